#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use student_roster::config::DatabaseConfig;
use student_roster::db::{StudentStore, connect_store};
use student_roster::{RecordController, StudentFields};

/// A throwaway SQLite file, removed on drop.
pub struct TempDb {
    pub path: PathBuf,
    pub config: DatabaseConfig,
}

impl TempDb {
    pub fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "roster-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let config = DatabaseConfig {
            url: Some(format!("sqlite://{}?mode=rwc", path.display())),
            ..DatabaseConfig::default()
        };
        Self { path, config }
    }

    pub async fn store(&self) -> StudentStore {
        connect_store(&self.config)
            .await
            .expect("failed to open temp database")
    }

    pub async fn controller(&self) -> RecordController {
        RecordController::new(self.store().await)
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn fields(name: &str, course: &str, mobile: &str) -> StudentFields {
    StudentFields::new(name, course, mobile)
}
