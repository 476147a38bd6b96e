//! Environment-driven configuration structures shared by all binaries.

use std::env;

use thiserror::Error;

/// Esplora-compatible endpoint used when `EXPLORER_BASE_URL` is not set.
pub const DEFAULT_EXPLORER_BASE_URL: &str = "https://mempool.space/signet/api";

/// Upper bound on history pages requested for a single address.
pub const DEFAULT_MAX_PAGES: u32 = 1_000;

/// API-specific configuration (public listener plus the optional internal
/// listener that carries `/metrics`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    api_bind_address: String,
    api_unix_socket: Option<String>,
    internal_bind_address: Option<String>,
    internal_unix_socket: Option<String>,
}

impl ApiConfig {
    /// Loads only the environment variables required by the API binary.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        Ok(Self {
            api_bind_address: get_required_var("API_BIND_ADDRESS")?,
            api_unix_socket: get_optional_var("API_UNIX_SOCKET"),
            internal_bind_address: get_optional_var("API_INTERNAL_BIND_ADDRESS"),
            internal_unix_socket: get_optional_var("API_INTERNAL_UNIX_SOCKET"),
        })
    }

    pub fn api_bind_address(&self) -> &str {
        &self.api_bind_address
    }

    pub fn api_unix_socket(&self) -> Option<&str> {
        self.api_unix_socket.as_deref()
    }

    pub fn internal_bind_address(&self) -> Option<&str> {
        self.internal_bind_address.as_deref()
    }

    pub fn internal_unix_socket(&self) -> Option<&str> {
        self.internal_unix_socket.as_deref()
    }

    pub fn has_internal_listener(&self) -> bool {
        self.internal_bind_address.is_some() || self.internal_unix_socket.is_some()
    }
}

/// Where the block explorer lives and how far a single history walk may go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    base_url: String,
    max_pages: u32,
}

impl ExplorerConfig {
    pub fn new(base_url: impl Into<String>, max_pages: u32) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            max_pages: max_pages.max(1),
        }
    }

    /// Hydrates `.env` (if present) and reads the explorer knobs. Both are
    /// optional; a present but malformed `EXPLORER_MAX_PAGES` is an error.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        let base_url = get_optional_var("EXPLORER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_EXPLORER_BASE_URL.to_string());
        let max_pages = match get_optional_var("EXPLORER_MAX_PAGES") {
            Some(raw) => {
                let parsed: u32 = raw.parse().map_err(|source| ConfigError::InvalidNumber {
                    key: "EXPLORER_MAX_PAGES",
                    source,
                })?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "EXPLORER_MAX_PAGES",
                        reason: "must be greater than zero",
                    });
                }
                parsed
            }
            None => DEFAULT_MAX_PAGES,
        };

        Ok(Self::new(base_url, max_pages))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORER_BASE_URL, DEFAULT_MAX_PAGES)
    }
}

fn normalize_base_url(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn get_required_var(key: &'static str) -> Result<String, ConfigError> {
    get_optional_var(key).ok_or(ConfigError::MissingVar { key })
}

fn get_optional_var(key: &'static str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn hydrate_env_file() -> Result<(), ConfigError> {
    if env::var_os("INTERACTION_CHECK_SKIP_DOTENV").is_some() {
        return Ok(());
    }
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(ConfigError::Dotenv { source: err }),
    }

    Ok(())
}

/// Errors emitted when `.env` hydration or environment parsing fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable `{key}`")]
    MissingVar { key: &'static str },
    #[error("invalid integer in `{key}`: {source}")]
    InvalidNumber {
        key: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("invalid value in `{key}`: {reason}")]
    InvalidValue {
        key: &'static str,
        reason: &'static str,
    },
    #[error("failed to load .env file: {source}")]
    Dotenv {
        #[from]
        source: dotenvy::Error,
    },
}
