use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::StockroomError;

const ENV_PREFIX: &str = "STOCKROOM_";

/// Runtime configuration.
///
/// Layered as: built-in defaults, then `STOCKROOM_*` environment variables,
/// then a bare `PORT` variable which wins over `STOCKROOM_PORT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the three collection files.
    pub data_dir: PathBuf,
    /// Front-end bundle; must contain `index.html`.
    pub static_dir: PathBuf,
    pub loglevel: String,
    /// Mark the session cookie `Secure`. The server itself speaks plain HTTP,
    /// so only turn this on behind a TLS-terminating proxy.
    pub secure_cookie: bool,
    /// Master secret for the cookie key. At least 32 bytes. A random key is
    /// generated per process when unset, which logs everyone out on restart.
    pub cookie_secret: Option<String>,
    pub session_ttl_secs: Option<u64>,
    pub body_limit_mb: usize,
    /// Allow-list of username -> plaintext password. A configured table
    /// replaces the built-in accounts rather than extending them.
    #[serde(default = "default_users", skip_serializing)]
    pub users: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_dir: PathBuf::from("."),
            static_dir: PathBuf::from("static"),
            loglevel: "info".to_string(),
            secure_cookie: false,
            cookie_secret: None,
            session_ttl_secs: None,
            body_limit_mb: 16,
            users: default_users(),
        }
    }
}

fn default_users() -> HashMap<String, String> {
    HashMap::from([
        ("sallen".to_string(), "Bigmac100".to_string()),
        ("bgaines".to_string(), "Cheese100".to_string()),
    ])
}

impl Config {
    /// Resolve configuration from defaults and the process environment.
    pub fn load() -> Result<Self, StockroomError> {
        Self::figment().extract().map_err(Into::into)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&["PORT"]))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, StockroomError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| StockroomError::Config(format!("invalid bind address: {e}")))
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.max(1) * 1024 * 1024
    }
}
