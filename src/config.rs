// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup and then treated as read-only.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Secret used to sign and verify auth tokens | Required |
//! | `TOKEN_TTL_SECONDS` | Lifetime of issued tokens | `36000` (10 hours) |
//! | `BCRYPT_COST` | bcrypt cost factor for password hashing | `10` |
//! | `DATA_DIR` | Root directory for the document store | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `GITHUB_API_URL` | GitHub REST API base URL | `https://api.github.com` |
//! | `GITHUB_TOKEN` | Optional GitHub token for repo lookups | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{collections::HashMap, net::SocketAddr, path::PathBuf, time::Duration};

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECONDS";
pub const BCRYPT_COST_ENV: &str = "BCRYPT_COST";

/// Environment variable name for the document store root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const GITHUB_API_URL_ENV: &str = "GITHUB_API_URL";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Header carrying the signed token on private endpoints.
///
/// Clients send the raw token here, not as `Authorization: Bearer`.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Default token lifetime: 10 hours.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 36_000;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "text" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Fully resolved application configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("data_dir", &self.data_dir)
            .field("bind_addr", &self.bind_addr)
            .field("github_api_url", &self.github_api_url)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let jwt_secret = get(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let token_ttl = match get(TOKEN_TTL_ENV) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    name: TOKEN_TTL_ENV,
                    reason: format!("{e}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: TOKEN_TTL_ENV,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
        };

        let bcrypt_cost = match get(BCRYPT_COST_ENV) {
            Some(raw) => {
                let cost: u32 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    name: BCRYPT_COST_ENV,
                    reason: format!("{e}"),
                })?;
                if !(4..=31).contains(&cost) {
                    return Err(ConfigError::Invalid {
                        name: BCRYPT_COST_ENV,
                        reason: "must be between 4 and 31".to_string(),
                    });
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: format!("{e}"),
                })?;

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(raw) => LogFormat::parse(&raw).ok_or_else(|| ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                reason: format!("expected 'json' or 'pretty', got '{raw}'"),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            jwt_secret,
            token_ttl,
            bcrypt_cost,
            data_dir: PathBuf::from(get(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
            bind_addr,
            github_api_url: get(GITHUB_API_URL_ENV)
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_token: get(GITHUB_TOKEN_ENV),
            log_format,
        })
    }
}
