// src/config/defaults.rs
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "decrypt-relocate.toml";
pub const DEFAULT_OBJECT_ROOT: &str = "data/objects";
pub const DEFAULT_SECRET_DIR: &str = "data/secrets";

pub fn default_object_root() -> PathBuf {
    PathBuf::from(DEFAULT_OBJECT_ROOT)
}

pub fn default_secret_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SECRET_DIR)
}
