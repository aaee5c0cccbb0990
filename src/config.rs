use std::env;
use std::path::PathBuf;

use crate::error::QuoteError;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATA_DIR: &str = "./data";
const MONGODB_DATABASE: &str = "TourMaker";
const DEFAULT_MARGIN_PERCENT: f64 = 12.0;
const DEFAULT_COUNTRY: &str = "Thailand";

/// Where quotations and the catalog are persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Memory,
    File(PathBuf),
    Mongo { uri: String, database: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub default_margin_percent: f64,
    pub default_country: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            storage: StorageBackend::File(PathBuf::from(DATA_DIR)),
            default_margin_percent: DEFAULT_MARGIN_PERCENT,
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, QuoteError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source so tests need not
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuoteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let storage = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File(PathBuf::from(
                lookup("DATA_DIR").unwrap_or_else(|| DATA_DIR.to_string()),
            )),
            "mongo" | "mongodb" => {
                let uri = lookup("MONGODB_URI").ok_or_else(|| {
                    QuoteError::Config("MONGODB_URI must be set for the mongo backend".to_string())
                })?;
                StorageBackend::Mongo {
                    uri,
                    database: lookup("MONGODB_DATABASE")
                        .unwrap_or_else(|| MONGODB_DATABASE.to_string()),
                }
            }
            other => {
                return Err(QuoteError::Config(format!(
                    "Unknown STORAGE_BACKEND '{}'",
                    other
                )))
            }
        };

        let default_margin_percent = lookup("DEFAULT_MARGIN_PERCENT")
            .and_then(|m| m.parse::<f64>().ok())
            .filter(|m| m.is_finite())
            .map(|m| m.clamp(0.0, 100.0))
            .unwrap_or(defaults.default_margin_percent);

        let default_country = lookup("DEFAULT_COUNTRY")
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(defaults.default_country);

        Ok(Self {
            host,
            port,
            storage,
            default_margin_percent,
            default_country,
        })
    }
}
