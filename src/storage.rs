//! Remote object storage for product images.

use std::time::Duration;

use actix_web::web::Bytes;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use uuid::Uuid;

use crate::models::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("object storage rejected upload with status {0}")]
    Rejected(u16),
}

/// Binary object storage capability.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` and return the public URL it is served from.
    async fn upload(&self, data: Bytes, content_type: &str) -> Result<String, StorageError>;
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        _ => "bin",
    }
}

/// Storage reached over HTTP: objects are `PUT` under `upload_url` and served
/// from `public_url` with the same key.
pub struct HttpObjectStorage {
    client: Client,
    upload_url: String,
    public_url: String,
    api_key: Option<String>,
}

impl HttpObjectStorage {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            upload_url: config.upload_url.trim_end_matches('/').to_string(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn object_key(content_type: &str) -> String {
        format!("products/{}.{}", Uuid::new_v4(), extension_for(content_type))
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(&self, data: Bytes, content_type: &str) -> Result<String, StorageError> {
        let key = Self::object_key(content_type);

        let mut request = self
            .client
            .put(format!("{}/{key}", self.upload_url))
            .header(CONTENT_TYPE, content_type)
            .body(data);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StorageError::Rejected(response.status().as_u16()));
        }

        log::info!("Uploaded product image {key}");
        Ok(format!("{}/{key}", self.public_url))
    }
}
