// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network-level failure talking to an external source (connect, timeout, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response from an external source had an unexpected shape
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Coarse classification used for log lines and user-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Parse,
    Persistence,
    Config,
    Telegram,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Transport(_) => ErrorKind::Transport,
            AppError::Parse(_) | AppError::Serialization(_) => ErrorKind::Parse,
            AppError::Database(_) | AppError::Pool(_) => ErrorKind::Persistence,
            AppError::Config(_) => ErrorKind::Config,
            AppError::Telegram(_) => ErrorKind::Telegram,
            AppError::Domain(_) | AppError::Io(_) | AppError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Localized copy shown to the user instead of the raw error.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Transport => "Не удалось обработать запрос",
            ErrorKind::Parse => "Некорректные данные запроса",
            _ => "Произошла неизвестная ошибка",
        }
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
