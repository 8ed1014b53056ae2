//! Configuration management for the gear inventory

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::MAX_IMAGE_BYTES;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Which store implementation backs uploads and documents
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Http,
}

impl StorageBackend {
    /// Whether stored documents outlive the process
    pub fn is_persistent(self) -> bool {
        matches!(self, StorageBackend::Http)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Base URL receiving object uploads (`PUT {object_store_url}/{key}`)
    pub object_store_url: String,
    /// Base URL under which uploaded objects are publicly readable
    pub public_base_url: String,
    /// Base URL of the document store (`{document_store_url}/{collection}`)
    pub document_store_url: String,
    pub collection: String,
    /// Root folder for photos; each firefighter gets a sub-folder
    pub photo_root: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadConfig {
    pub max_image_bytes: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FormConfig {
    /// Delay between a successful submission and the form reset
    pub reset_delay_ms: u64,
}

impl FormConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub form: FormConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // FIREGEAR_STORAGE__BACKEND=http etc.
            .add_source(
                Environment::with_prefix("FIREGEAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "storage.document_store_url",
                env::var("DOCUMENT_STORE_URL").ok(),
            )?
            .set_override_option(
                "storage.object_store_url",
                env::var("OBJECT_STORE_URL").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            object_store_url: "http://localhost:9000/upload".to_string(),
            public_base_url: "http://localhost:9000/files".to_string(),
            document_store_url: "http://localhost:8081/documents".to_string(),
            collection: "equipment-inventories".to_string(),
            photo_root: "equipment-photos".to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 3000,
        }
    }
}
