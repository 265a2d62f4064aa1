#![allow(dead_code)]

use student_records::{ConnectionMode, StorageConfig, StorageManager};
use tempfile::TempDir;

/// A file-backed store in a fresh temp directory, schema applied.
/// Keep the `TempDir` alive for as long as the store is used.
pub fn create_temp_store(mode: ConnectionMode) -> (StorageManager, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::new(dir.path().join("students.db")).with_connection_mode(mode);
    let storage = StorageManager::open(config).unwrap();
    assert!(storage.ensure_schema());
    (storage, dir)
}

pub fn modes() -> [ConnectionMode; 2] {
    [
        ConnectionMode::PerOperation,
        ConnectionMode::Pooled { max_size: 2 },
    ]
}
