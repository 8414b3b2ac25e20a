use crate::errors::ConfigError;
use std::{env, time::Duration};

pub const DEFAULT_BACKEND_API: &str = "http://attribution-service:8081/api";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_api: String,
    pub port: u16,
    pub cache_ttl: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_api = lookup("BACKEND_API")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_API.to_string());

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError {
                var: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let cache_ttl = match lookup("CACHE_TTL_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError {
                    var: "CACHE_TTL_SECS",
                    value,
                })?,
            None => DEFAULT_CACHE_TTL,
        };

        Ok(Self {
            backend_api: backend_api.trim_end_matches('/').to_string(),
            port,
            cache_ttl,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_api: DEFAULT_BACKEND_API.to_string(),
            port: DEFAULT_PORT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}
