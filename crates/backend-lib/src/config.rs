// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Everything has a reasonable default except the token signing secret,
//! which must be supplied explicitly through the config file or a
//! `COFFER_`-prefixed environment variable; without one the process
//! refuses to start.
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// SQLite database path
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Token signing secret; deliberately has no default
    pub signing_secret: String,
    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_addr() -> SocketAddr {
    "127.0.0.1:3000".parse().unwrap()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("coffer.db")
}

fn default_token_ttl_secs() -> i64 {
    60 * 60 * 24
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    /// Defaults for every field except the signing secret, which stays
    /// empty; building an application state from these fails until a
    /// caller fills one in.
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_path: default_database_path(),
            signing_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
            log_level: default_log_level(),
        }
    }
}

/// Load settings from `coffer.toml` and `COFFER_`-prefixed environment
/// variables, the latter taking precedence.
pub fn load_settings() -> Result<Settings> {
    let settings = Figment::new()
        .merge(Toml::file("coffer.toml"))
        .merge(Env::prefixed("COFFER_"))
        .extract()?;

    Ok(settings)
}
