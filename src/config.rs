use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MedSafe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the listen address.
pub const ADDR_ENV: &str = "MEDSAFE_ADDR";
/// Environment variable overriding the account database path.
pub const DB_PATH_ENV: &str = "MEDSAFE_DB_PATH";
/// Environment variable pointing at a knowledge base directory.
pub const KNOWLEDGE_DIR_ENV: &str = "MEDSAFE_KNOWLEDGE_DIR";

const DEFAULT_ADDR: &str = "127.0.0.1:8787";
const DB_FILE_NAME: &str = "medsafe.db";

/// Get the application data directory
/// ~/MedSafe/ on all platforms. Falls back to the working directory when
/// no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default account database location.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join(DB_FILE_NAME)
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "medsafe_lib=debug,medsafe=debug,tower_http=info"
    } else {
        "medsafe_lib=info,medsafe=info"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var} value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    /// `None` selects the bundled dataset.
    pub knowledge_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_raw = get(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: ADDR_ENV,
                value: addr_raw.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            addr,
            db_path: get(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            knowledge_dir: get(KNOWLEDGE_DIR_ENV).map(PathBuf::from),
        })
    }
}
