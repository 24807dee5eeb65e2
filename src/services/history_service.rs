// src/services/history_service.rs
use std::sync::Arc;

use log::debug;

use crate::domain::film::FilmCandidate;
use crate::domain::history::{validate_search_record, NewSearchRecord, SearchRecord, UserStat};
use crate::domain::UserId;
use crate::error::AppResult;
use crate::repositories::SearchHistoryRepository;

pub struct HistoryService {
    repo: Arc<dyn SearchHistoryRepository>,
}

impl HistoryService {
    pub fn new(repo: Arc<dyn SearchHistoryRepository>) -> Self {
        Self { repo }
    }

    /// Record a search with the film that was shown first for it.
    /// Candidates without both a name and a year record as unresolved.
    pub async fn record_search(
        &self,
        user_id: UserId,
        query: &str,
        shown: Option<&FilmCandidate>,
    ) -> AppResult<i64> {
        let record = match shown
            .and_then(FilmCandidate::details)
            .and_then(|film| film.resolved_identity())
        {
            Some((name, year)) => NewSearchRecord::resolved(user_id, query, name, year),
            None => NewSearchRecord::unresolved(user_id, query),
        };

        validate_search_record(&record)?;
        let id = self.repo.record(record).await?;
        debug!("Recorded search #{} for user {}", id, user_id);
        Ok(id)
    }

    /// Full history, newest first
    pub async fn history(&self, user_id: UserId) -> AppResult<Vec<SearchRecord>> {
        self.repo.history(user_id, None).await
    }

    pub async fn stats(&self, user_id: UserId) -> AppResult<Vec<UserStat>> {
        self.repo.stats(user_id).await
    }
}
