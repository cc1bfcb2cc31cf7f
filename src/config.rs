//! Application configuration loaded from environment variables.

use serde::Deserialize;
use strum::{Display, EnumString};

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MongoDB collection.
    #[default]
    #[serde(alias = "mongodb")]
    #[strum(to_string = "mongo", serialize = "mongodb")]
    Mongo,
    /// In-process map, lost on exit.
    #[strum(to_string = "memory")]
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Storage ===
    /// Which storage backend to serve from.
    #[serde(default)]
    pub storage: StorageBackend,

    /// MongoDB connection string.
    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,

    /// MongoDB database name.
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Seed sample students into an empty collection at startup.
    #[serde(default = "default_true")]
    pub seed: bool,
}

fn default_port() -> u16 {
    3000
}

fn default_mongodb_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "ITDepartmentDB".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            storage: StorageBackend::default(),
            mongodb_uri: default_mongodb_uri(),
            database_name: default_database_name(),
            seed: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.storage == StorageBackend::Mongo {
            if self.mongodb_uri.trim().is_empty() {
                return Err("MONGODB_URI is required for the mongo backend".to_string());
            }
            if self.database_name.trim().is_empty() {
                return Err("DATABASE_NAME is required for the mongo backend".to_string());
            }
        }

        Ok(())
    }
}
