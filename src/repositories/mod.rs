// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - Explicit SQL only

pub mod search_history_repository;

pub use search_history_repository::{SearchHistoryRepository, SqliteSearchHistoryRepository};

#[cfg(test)]
pub use search_history_repository::MockSearchHistoryRepository;
