// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod film_lookup_service;
pub mod history_service;
pub mod link_resolver;
pub mod session_service;


pub use film_lookup_service::FilmLookupService;
pub use history_service::HistoryService;
pub use link_resolver::{similarity_ratio, LinkResolver};
pub use session_service::{Session, SessionStore};
