// ============================
// backend-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `TASKMGR_`-prefixed environment variables (`__` separates sections, e.g.
//! `TASKMGR_AUTH__JWT_SECRET`).
//!
//! The JWT signing secret has no default. It is read once at startup and
//! handed to the token issuer; rotating it means restarting with a new value,
//! which invalidates every outstanding access token. Refresh sessions are not
//! signed and survive a rotation.
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Minimum accepted length of the JWT signing secret in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub password: PasswordSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Root directory of the flat-file user store
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HS256 signing secret for access tokens
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
    /// Lifetime of a refresh session
    pub session_ttl_secs: u64,
    /// scrypt work factor (log2 of the CPU/memory cost)
    pub scrypt_log_n: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordSettings {
    pub min_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data"),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_secs: 15 * 60,
            session_ttl_secs: 10 * 24 * 60 * 60, // 10 days
            scrypt_log_n: 15,
        }
    }
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` in the working directory and the environment
    pub fn load() -> Result<Self> {
        Self::figment(Path::new("config.toml")).extract().map_err(Into::into)
    }

    /// Load settings from an explicit TOML file and the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        Self::figment(path).extract().map_err(Into::into)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TASKMGR_").split("__"))
    }

    /// Check settings for values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.len() < MIN_SECRET_LENGTH {
            bail!("auth.jwt_secret must be at least {MIN_SECRET_LENGTH} bytes");
        }
        if self.auth.access_token_ttl_secs == 0 {
            bail!("auth.access_token_ttl_secs must be greater than zero");
        }
        if self.auth.session_ttl_secs == 0 {
            bail!("auth.session_ttl_secs must be greater than zero");
        }
        if !(4..=20).contains(&self.auth.scrypt_log_n) {
            bail!("auth.scrypt_log_n must be between 4 and 20");
        }
        if self.password.min_length < 8 {
            bail!("password.min_length must be at least 8");
        }
        if !["trace", "debug", "info", "warn", "error"].contains(&self.log.level.as_str()) {
            bail!("log.level {} is not a valid level", self.log.level);
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }
}
