//! Email notifications sent when categories change.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::domain::category::Category;
use crate::models::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid mail address: {0}")]
    Address(String),
    #[error("failed to build email message: {0}")]
    Message(String),
    #[error("SMTP send failed: {0}")]
    Transport(String),
}

/// Structured message handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl Notification {
    pub fn category_created(category: &Category) -> Self {
        let name = category.name.as_str();
        Self {
            subject: "Nova categoria criada".to_string(),
            text: format!("Uma nova categoria foi criada: {name}"),
            html: format!(
                "<p>Uma nova categoria foi criada: <strong>{}</strong></p>",
                html_escape::encode_text(name)
            ),
        }
    }

    pub fn category_updated(category: &Category) -> Self {
        let name = category.name.as_str();
        Self {
            subject: "Categoria Atualizada".to_string(),
            text: format!("A categoria \"{name}\" foi atualizada com sucesso!"),
            html: format!(
                "<p>A categoria <strong>{}</strong> foi atualizada com sucesso!</p>",
                html_escape::encode_text(name)
            ),
        }
    }
}

/// Email delivery capability.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `notification`; an error means it was not accepted.
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// SMTP-backed [`Mailer`] sending every notification to one configured recipient.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| NotificationError::Address(format!("{}: {e}", config.from)))?;
        let to: Mailbox = config
            .to
            .parse()
            .map_err(|e| NotificationError::Address(format!("{}: {e}", config.to)))?;

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| NotificationError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                notification.text.clone(),
                notification.html.clone(),
            ))
            .map_err(|e| NotificationError::Message(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        log::info!("Sent notification '{}' to {}", notification.subject, self.to);
        Ok(())
    }
}
