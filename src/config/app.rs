// src/config/app.rs
use super::defaults::*;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::consts::{
    CONFIG_PATH_ENV, OBJECT_STORE_ROOT_ENV, PADDING_ENV, PRIVATE_KEY_PATH_ENV,
    RESULT_BUCKET_PATH_ENV, SECRET_STORE_DIR_ENV,
};
use crate::enums::PaddingMode;
use crate::error::RelayError;

#[derive(Debug, Clone)]
pub struct Config {
    pub pipeline: PipelineSettings,
    pub storage: StorageSettings,
}

/// Everything one invocation of the pipeline needs besides its clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub secret_id: String,
    pub destination_bucket: String,
    pub padding: PaddingMode,
}

impl PipelineSettings {
    pub fn new(secret_id: impl Into<String>, destination_bucket: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            destination_bucket: destination_bucket.into(),
            padding: PaddingMode::default(),
        }
    }

    pub fn with_padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub object_root: PathBuf,
    pub secret_dir: PathBuf,
}

// On-disk shape: every field optional, env fills the gaps
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    pipeline: FilePipeline,
    storage: FileStorage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FilePipeline {
    secret_id: Option<String>,
    destination_bucket: Option<String>,
    padding: Option<PaddingMode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileStorage {
    object_root: Option<PathBuf>,
    secret_dir: Option<PathBuf>,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load config once per process from `DECRYPT_RELOCATE_CONFIG` (or the
/// default file, if present) plus environment overrides
pub fn load() -> Result<&'static Config, RelayError> {
    CONFIG.get_or_try_init(|| resolve(config_path().as_deref(), |name| std::env::var(name).ok()))
}

/// Padding mode from the process config, without requiring the pipeline fields
///
/// Used by tooling that only encrypts. An invalid padding value or an
/// unreadable config file is still an error.
pub fn load_padding() -> Result<PaddingMode, RelayError> {
    resolve_padding(config_path().as_deref(), |name| std::env::var(name).ok())
}

fn config_path() -> Option<PathBuf> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => Some(PathBuf::from(DEFAULT_CONFIG_PATH)),
        Err(_) => {
            debug!("{DEFAULT_CONFIG_PATH} not found, using environment only");
            None
        }
    }
}

fn read_file(config_file: Option<&Path>) -> Result<FileConfig, RelayError> {
    let Some(path) = config_file else {
        return Ok(FileConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| RelayError::Config(format!("cannot read {}: {e}", path.display())))?;
    toml::from_str::<FileConfig>(&content)
        .map_err(|e| RelayError::Config(format!("invalid TOML in {}: {e}", path.display())))
}

fn pick_padding(
    env_value: Option<String>,
    file_value: Option<PaddingMode>,
) -> Result<PaddingMode, RelayError> {
    match env_value {
        Some(raw) => raw.parse::<PaddingMode>().map_err(RelayError::Config),
        None => Ok(file_value.unwrap_or_default()),
    }
}

/// Padding mode alone: env over file, default `oaep-sha1`
pub fn resolve_padding<F>(config_file: Option<&Path>, lookup: F) -> Result<PaddingMode, RelayError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = read_file(config_file)?;
    let env_value = lookup(PADDING_ENV).filter(|v| !v.trim().is_empty());
    pick_padding(env_value, file.pipeline.padding)
}

/// Build a config from an optional TOML file and an environment lookup
///
/// Environment values win over the file. Blank values count as unset.
pub fn resolve<F>(config_file: Option<&Path>, lookup: F) -> Result<Config, RelayError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = read_file(config_file)?;

    let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let secret_id = env(PRIVATE_KEY_PATH_ENV)
        .or(file.pipeline.secret_id)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            RelayError::Config(format!(
                "secret id missing: set {PRIVATE_KEY_PATH_ENV} or pipeline.secret_id"
            ))
        })?;

    let destination_bucket = env(RESULT_BUCKET_PATH_ENV)
        .or(file.pipeline.destination_bucket)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            RelayError::Config(format!(
                "destination bucket missing: set {RESULT_BUCKET_PATH_ENV} or pipeline.destination_bucket"
            ))
        })?;

    let padding = pick_padding(env(PADDING_ENV), file.pipeline.padding)?;

    let object_root = env(OBJECT_STORE_ROOT_ENV)
        .map(PathBuf::from)
        .or(file.storage.object_root)
        .unwrap_or_else(default_object_root);

    let secret_dir = env(SECRET_STORE_DIR_ENV)
        .map(PathBuf::from)
        .or(file.storage.secret_dir)
        .unwrap_or_else(default_secret_dir);

    Ok(Config {
        pipeline: PipelineSettings {
            secret_id,
            destination_bucket,
            padding,
        },
        storage: StorageSettings {
            object_root,
            secret_dir,
        },
    })
}
