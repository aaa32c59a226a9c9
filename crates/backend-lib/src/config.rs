// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use anyhow::{bail, Result};
use axum::http::HeaderValue;
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use serde::{Deserialize, Serialize};

use crate::auth::{DEFAULT_HASH_COST, MAX_HASH_COST};

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "boxdepot.toml";

/// Prefix for environment overrides, e.g. `BOXDEPOT_HASH_COST=12`
pub const ENV_PREFIX: &str = "BOXDEPOT_";

/// Request bodies up to 50 MiB are accepted by default
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interface to listen on
    pub bind_host: IpAddr,
    /// TCP port
    pub port: u16,
    /// Store location: `memory://`, `file://<dir>` or a bare directory path
    pub database_url: String,
    /// scrypt work factor (log2 of N) for newly hashed passwords
    pub hash_cost: u8,
    /// Largest accepted request body in bytes
    pub body_limit_bytes: usize,
    /// `*` or a single allowed origin
    pub cors_allow_origin: String,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            database_url: "file://data".to_string(),
            hash_cost: DEFAULT_HASH_COST,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            cors_allow_origin: "*".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Load settings from `boxdepot.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from the given TOML file and the environment.
    ///
    /// Later sources win: defaults, the file, `MONGO_URL` (legacy name for
    /// the database URL), the bare `PORT` and `DATABASE_URL` variables,
    /// then `BOXDEPOT_*` variables. A missing file is not an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Self::figment(path).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// The provider chain behind [`Settings::load_from`]
    pub fn figment<P: AsRef<Path>>(path: P) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::raw().only(&["MONGO_URL"]).map(|_| "database_url".into()))
            .merge(Env::raw().only(&["PORT", "DATABASE_URL"]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Check that every field holds a usable value
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!("invalid log level '{}', expected one of {:?}", self.log_level, LOG_LEVELS);
        }
        if self.hash_cost == 0 || self.hash_cost > MAX_HASH_COST {
            bail!("hash_cost must be between 1 and {MAX_HASH_COST}, got {}", self.hash_cost);
        }
        if self.body_limit_bytes == 0 {
            bail!("body_limit_bytes must be positive");
        }
        if self.database_url.trim().is_empty() {
            bail!("database_url must not be empty");
        }
        if self.cors_allow_origin != "*" && HeaderValue::from_str(&self.cors_allow_origin).is_err() {
            bail!("cors_allow_origin '{}' is not a valid header value", self.cors_allow_origin);
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }
}

#[cfg(test)]
mod config_tests;
