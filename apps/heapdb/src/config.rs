use page::MAX_ROW_SIZE;
use serde::Deserialize;
use std::path::PathBuf;
use std::{num::NonZeroUsize, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config file {}", path.display())]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub storage: StorageConfig,
    #[serde(default)]
    pub workload: WorkloadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub buffer_pages: NonZeroUsize,
}

/// The load-and-scan run performed at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    pub file_name: String,
    pub records: u32,
    pub record_size: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            file_name: "demo.tbl".to_string(),
            records: 1000,
            record_size: 64,
        }
    }
}

/// Size of the integer key every workload record starts with.
pub const KEY_SIZE: usize = size_of::<i32>();

impl EngineConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml(&text).map_err(|e| match e {
            ConfigError::ParseToml { source, .. } => ConfigError::ParseToml { path, source },
            other => other,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = toml::from_str(text).map_err(|e| ConfigError::ParseToml {
            path: PathBuf::new(),
            source: e,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // buffer_pages is already NonZeroUsize, so "0" can't happen.
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                message: "storage.data_dir must not be empty".to_string(),
            });
        }
        if self.workload.file_name.is_empty() {
            return Err(ConfigError::Invalid {
                message: "workload.file_name must not be empty".to_string(),
            });
        }
        if !(KEY_SIZE..=MAX_ROW_SIZE).contains(&self.workload.record_size) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "workload.record_size must be between {KEY_SIZE} and {MAX_ROW_SIZE}"
                ),
            });
        }
        Ok(())
    }
}
