// src/lib.rs
// CinemaBot - Telegram bot for film and series lookup
//
// Architecture:
// - Domain-centric: films, search history and paging state are plain types
// - Explicit: every external system sits behind a trait
// - Per-user state lives in one session store, nowhere else
// - Application Layer: Telegram boundary (dispatcher, poller, presenter)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    ContextKind, Direction, DisplayPayload, FilmCandidate, FilmDetails, NavAction,
    NavigationContext, NavigationControls, NewSearchRecord, Pager, Rating, SearchRecord,
    StreamingLink, UserId, UserStat,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{SearchHistoryRepository, SqliteSearchHistoryRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{FilmLookupService, HistoryService, LinkResolver, SessionStore};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, Dispatcher, Poller, Presenter};
pub use config::Config;
