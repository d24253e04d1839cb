//! Backend selection and connection parameters
//!
//! Read once at startup from `HBNB_*` environment variables.

use hbnb_core::errors::HbnbError;
use hbnb_core_types::Sensitive;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::Result;
use crate::file_storage::DEFAULT_FILE_PATH;

pub const ENV_TYPE_STORAGE: &str = "HBNB_TYPE_STORAGE";
pub const ENV_FILE_PATH: &str = "HBNB_FILE_PATH";
pub const ENV_DB_HOST: &str = "HBNB_DB_HOST";
pub const ENV_DB_USER: &str = "HBNB_DB_USER";
pub const ENV_DB_PWD: &str = "HBNB_DB_PWD";
pub const ENV_DB_NAME: &str = "HBNB_DB_NAME";
pub const ENV_ENV: &str = "HBNB_ENV";

/// Default relational database (an SQLite path)
pub const DEFAULT_DB_NAME: &str = "hbnb.db";

/// Which backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    File,
    Db,
}

impl FromStr for StorageKind {
    type Err = HbnbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "file" => Ok(StorageKind::File),
            "db" => Ok(StorageKind::Db),
            other => Err(HbnbError::InvalidConfig {
                message: format!("{} must be 'file' or 'db', got '{}'", ENV_TYPE_STORAGE, other),
            }),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::File => f.write_str("file"),
            StorageKind::Db => f.write_str("db"),
        }
    }
}

/// Relational connection parameters
///
/// SQLite only needs `database`; host and user are kept for diagnostics.
#[derive(Debug)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: Sensitive<String>,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: String::new(),
            password: Sensitive::new(String::new()),
            database: DEFAULT_DB_NAME.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct StorageConfig {
    pub kind: StorageKind,
    pub file_path: PathBuf,
    pub db: DbConfig,
    /// Deployment environment; `test` drops the relational schema on init
    pub env: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            db: DbConfig::default(),
            env: None,
        }
    }
}

impl StorageConfig {
    /// Build a config from a variable lookup
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an unknown `HBNB_TYPE_STORAGE`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());
        let defaults = DbConfig::default();

        let kind = match var(ENV_TYPE_STORAGE) {
            Some(value) => value.trim().parse::<StorageKind>()?,
            None => StorageKind::default(),
        };

        Ok(Self {
            kind,
            file_path: var(ENV_FILE_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_PATH)),
            db: DbConfig {
                host: var(ENV_DB_HOST).unwrap_or(defaults.host),
                user: var(ENV_DB_USER).unwrap_or(defaults.user),
                password: var(ENV_DB_PWD).map(Sensitive::new).unwrap_or(defaults.password),
                database: var(ENV_DB_NAME).unwrap_or(defaults.database),
            },
            env: var(ENV_ENV),
        })
    }

    /// Build a config from the process environment
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an unknown `HBNB_TYPE_STORAGE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Whether the relational schema is dropped when the engine is built
    pub fn is_test_env(&self) -> bool {
        self.env.as_deref() == Some("test")
    }
}
