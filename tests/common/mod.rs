use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use transcript_chat::api::ApiGateway;
use transcript_chat::config::ApiConfig;
use transcript_chat::storage::{SessionStore, SqliteBackend};

/// A transcript comfortably above the minimum length
#[allow(dead_code)]
pub const TRANSCRIPT: &str = "Team discussed Q3 roadmap and budget.";

#[allow(dead_code)]
pub fn gateway_for(base_url: &str) -> ApiGateway {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    ApiGateway::new(&config).expect("failed to create gateway")
}

#[allow(dead_code)]
pub fn create_temp_store() -> (SessionStore, PathBuf, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("store.db");
    let backend = SqliteBackend::new_with_path(&db_path).expect("failed to create sqlite backend");
    (SessionStore::new(Box::new(backend)), db_path, tmp)
}

#[allow(dead_code)]
pub fn reopen_store(db_path: &Path) -> SessionStore {
    let backend = SqliteBackend::new_with_path(db_path).expect("failed to reopen sqlite backend");
    SessionStore::new(Box::new(backend))
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
