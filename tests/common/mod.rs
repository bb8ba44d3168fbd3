//! Helpers for integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::web::Bytes;
use async_trait::async_trait;
use pushkind_catalog::db::{DbPool, establish_connection_pool, run_migrations};
use pushkind_catalog::notifications::{Mailer, Notification, NotificationError};
use pushkind_catalog::storage::{ObjectStorage, StorageError};
use tempfile::TempDir;

/// Temporary database used in integration tests. The database lives in its
/// own directory so the WAL side files are removed with it.
pub struct TestDb {
    _tempdir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempdir = TempDir::new().expect("Failed to create temp dir");
        let path = tempdir.path().join("catalog.db");
        let pool = establish_connection_pool(path.to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            _tempdir: tempdir,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Mailer keeping every notification in memory.
#[derive(Default)]
pub struct MemoryMailer {
    pub sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

impl MemoryMailer {
    pub fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.subject.clone())
            .collect()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(NotificationError::Transport("smtp unavailable".to_string()));
        }
        Ok(())
    }
}

/// Storage handing out sequential CDN URLs.
#[derive(Default)]
pub struct MemoryStorage {
    pub uploads: AtomicUsize,
    pub content_types: Mutex<Vec<String>>,
}

impl MemoryStorage {
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, _data: Bytes, content_type: &str) -> Result<String, StorageError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        self.content_types
            .lock()
            .unwrap()
            .push(content_type.to_string());
        Ok(format!("https://cdn.example.com/products/{n}"))
    }
}
