//! Server configuration from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_AUTH_TOKEN: &str = "secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("HELLO_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Token expected after `Bearer ` on `/secure/*` routes.
    pub auth_token: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// - HELLO_BIND: socket address to bind (default: 127.0.0.1:3000)
    /// - PORT: port on 127.0.0.1, used only when HELLO_BIND is unset
    /// - HELLO_AUTH_TOKEN: bearer token for /secure routes (default: secret)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_str = match (lookup("HELLO_BIND"), lookup("PORT")) {
            (Some(bind), _) if !bind.is_empty() => bind,
            (_, Some(port)) if !port.is_empty() => {
                let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
                format!("127.0.0.1:{port}")
            }
            _ => DEFAULT_BIND.to_string(),
        };
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let auth_token = lookup("HELLO_AUTH_TOKEN")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_TOKEN.to_string());

        Ok(Self { bind, auth_token })
    }
}
