// src/config.rs
//
// Runtime configuration from the environment (optionally seeded from .env).
//
// CRITICAL RULES:
// - Missing credentials are fatal at startup
// - Everything else falls back to a default, with a warning when a value
//   was present but unusable

use std::path::PathBuf;
use std::time::Duration;

use log::warn;

use crate::db::get_database_path;
use crate::error::{AppError, AppResult};
use crate::services::film_lookup_service::{DEFAULT_MOVIE_CAP, DEFAULT_RATE_LIMIT_BACKOFF};
use crate::services::link_resolver::DEFAULT_LINKS_CAP;
use crate::services::session_service::DEFAULT_SESSION_IDLE;

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bot_token: String,
    pub kinopoisk_api_key: String,
    pub movie_cap: usize,
    pub links_cap: usize,
    pub database_path: PathBuf,
    pub http_timeout: Duration,
    /// Never below DEFAULT_RATE_LIMIT_BACKOFF
    pub rate_limit_backoff: Duration,
    pub session_idle: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let bot_token = required("BOT_TOKEN")?;
        let kinopoisk_api_key = required("KINOPOISK_UNOFFICIAL_API_KEY")?;

        let database_path = match lookup("DATABASE_PATH").filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => get_database_path()?,
        };

        let backoff_ms = number(&lookup, "RATE_LIMIT_BACKOFF_MS", DEFAULT_RATE_LIMIT_BACKOFF.as_millis() as u64);

        Ok(Self {
            bot_token,
            kinopoisk_api_key,
            movie_cap: number(&lookup, "MOVIE_CAP", DEFAULT_MOVIE_CAP as u64).max(1) as usize,
            links_cap: number(&lookup, "LINK_CAP", DEFAULT_LINKS_CAP as u64) as usize,
            database_path,
            http_timeout: Duration::from_secs(number(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT.as_secs()).max(1)),
            rate_limit_backoff: Duration::from_millis(backoff_ms).max(DEFAULT_RATE_LIMIT_BACKOFF),
            session_idle: Duration::from_secs(number(&lookup, "SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE.as_secs())),
        })
    }
}

fn number<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{}={:?} is not a non-negative integer, using {}", key, raw, default);
            default
        }),
    }
}
