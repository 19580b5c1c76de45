use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "https://mongo-db-lac-eight.vercel.app/api/posts";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Http,
    Memory,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub backend: Backend,
    pub bind_addr: SocketAddr,
    pub toast_duration: Duration,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("POSTS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let backend = match lookup("POSTS_BACKEND").as_deref() {
            None | Some("http") => Backend::Http,
            Some("memory") => Backend::Memory,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "POSTS_BACKEND must be `http` or `memory`, got `{}`",
                    other
                )));
            }
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let toast_ms = match lookup("TOAST_DURATION_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| AppError::Config(format!("TOAST_DURATION_MS is invalid: {}", e)))?,
            None => DEFAULT_TOAST_DURATION_MS,
        };

        Ok(Self {
            api_url,
            backend,
            bind_addr,
            toast_duration: Duration::from_millis(toast_ms),
        })
    }
}
