// src/application/state.rs

use std::sync::Arc;

use crate::application::presenter::Presenter;
use crate::services::{FilmLookupService, HistoryService, SessionStore};

/// Everything a command needs. All fields are Arc-wrapped for sharing across
/// per-user tasks. Services are built in main.rs and passed here.
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub film_lookup: Arc<FilmLookupService>,
    pub history_service: Arc<HistoryService>,
    pub presenter: Arc<Presenter>,
}
