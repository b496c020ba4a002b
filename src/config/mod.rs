//! Server configuration from environment variables (`.env` honoured by the binary).

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const PORT_VAR: &str = "AUDIO_SERVER_PORT";
pub const HOST_VAR: &str = "AUDIO_SERVER_HOST";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";
pub const SCHEMA_VAR: &str = "AUDIO_SCHEMA";
pub const BODY_LIMIT_VAR: &str = "AUDIO_BODY_LIMIT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// PostgreSQL schema holding the song, podcast and audiobook tables.
    pub schema: String,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Only the port is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = get(PORT_VAR).ok_or(ConfigError::Missing(PORT_VAR))?;
        let port = parse(PORT_VAR, &port)?;
        let host = match get(HOST_VAR) {
            Some(h) => parse(HOST_VAR, &h)?,
            None => IpAddr::from([127, 0, 0, 1]),
        };
        let database_url = get(DATABASE_URL_VAR).unwrap_or_else(|| "postgres://localhost/audiofiles".into());
        let max_connections = match get(MAX_CONNECTIONS_VAR) {
            Some(n) => parse(MAX_CONNECTIONS_VAR, &n)?,
            None => 5,
        };
        let schema = get(SCHEMA_VAR).unwrap_or_else(|| "public".into());
        let body_limit = match get(BODY_LIMIT_VAR) {
            Some(n) => parse(BODY_LIMIT_VAR, &n)?,
            None => 64 * 1024,
        };

        Ok(ServerConfig {
            host,
            port,
            database_url,
            max_connections,
            schema,
            body_limit,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: format!("'{}': {}", raw, e),
    })
}
