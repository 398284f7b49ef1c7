//! Configuration loading.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults.
//! 2. A TOML file: `$REHOME_CONFIG` if set (it must exist), otherwise
//!    `config.toml` in the platform config directory, if present.
//! 3. `DATABASE_URL`, as `database.url`.
//! 4. `REHOME_*` variables, with `__` separating nested keys
//!    (`REHOME_DATABASE__URL`, `REHOME_STORAGE_ROOT`, ...).
//!
//! `storage_root` and `database.url` have no default.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
pub use rehome_relocate::TenantErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "REHOME_";
/// Environment variable naming an explicit configuration file.
pub const CONFIG_FILE_ENV: &str = "REHOME_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Absolute path of the shared storage directory.
    pub storage_root: PathBuf,
    pub database: DatabaseConfig,
    /// How long to wait for cleanup after the run before exiting anyway.
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
    #[serde(default)]
    pub on_tenant_error: TenantErrorPolicy,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), format: LogFormat::default() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_shutdown_grace_ms() -> u64 {
    1000
}

fn default_acquire_timeout_ms() -> u64 {
    30_000
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from every source.
    pub fn load() -> Result<Self> {
        let file = match std::env::var_os(CONFIG_FILE_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.is_file() {
                    exn::bail!(ErrorKind::NotFound(path));
                }
                Some(path)
            },
            None => default_path().filter(|path| path.is_file()),
        };
        Self::from_figment(Self::figment(file.as_deref()))
    }

    /// The layered providers, minus extraction.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "database.url".into()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().or_raise(|| ErrorKind::Invalid)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

/// `config.toml` in the platform configuration directory, e.g.
/// `~/.config/rehome/config.toml` on Linux.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rehome").map(|dirs| dirs.config_dir().join("config.toml"))
}
