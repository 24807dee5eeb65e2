// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod display;
pub mod film;
pub mod history;
pub mod navigation;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Rendering
pub use display::DisplayPayload;

// Film Domain
pub use film::{
    FilmCandidate, FilmDetails, LinkSource, Rating, StreamingLink, FILM_NOT_FOUND_MESSAGE,
};

// History Domain
pub use history::{rank_user_stats, validate_search_record, NewSearchRecord, SearchRecord, UserStat};

// Navigation Domain
pub use navigation::{
    total_pages, ContextKind, Direction, NavAction, NavigationContext, NavigationControls,
    PageView, Pager,
};

/// Messaging-platform user identifier
pub type UserId = i64;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown navigation action: {0}")]
    InvalidNavigation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
