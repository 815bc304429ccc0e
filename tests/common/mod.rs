use chatclone::config::{Config, ServerConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn config_for(server_uri: &str) -> Config {
    Config {
        server: ServerConfig {
            base_url: server_uri.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("failed to write temp file");
    (temp_dir, path)
}
