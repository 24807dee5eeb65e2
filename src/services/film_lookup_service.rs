// src/services/film_lookup_service.rs
//
// Film Lookup Service - query → capped list of candidates
//
// RESPONSIBILITIES:
// - One keyword search per query, first page only
// - Rate limiting: one delayed retry, never more
// - Auth / status failures degrade to "nothing found"
// - Never reorders provider results, only truncates
//
// Transport and parse failures are NOT "nothing found". `search` returns them
// as errors; `search_for_display` turns them into a NotFound candidate with a
// generic message after logging, so the two cases stay apart in the logs.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use crate::domain::film::{FilmCandidate, FilmDetails};
use crate::error::AppResult;
use crate::integrations::kinopoisk::{MetadataProvider, ProviderReply};

pub const DEFAULT_MOVIE_CAP: usize = 3;
pub const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(500);

pub struct FilmLookupService {
    provider: Arc<dyn MetadataProvider>,
    movie_cap: usize,
    rate_limit_backoff: Duration,
}

impl FilmLookupService {
    pub fn new(provider: Arc<dyn MetadataProvider>, movie_cap: usize, rate_limit_backoff: Duration) -> Self {
        Self {
            provider,
            movie_cap,
            rate_limit_backoff,
        }
    }

    /// At most `movie_cap` candidates in provider order, or exactly one
    /// NotFound candidate when the provider has nothing usable.
    pub async fn search(&self, query: &str) -> AppResult<Vec<FilmCandidate>> {
        let films = match self.provider.search_by_keyword(query).await? {
            ProviderReply::RateLimited => {
                warn!("Kinopoisk rate limit hit for '{}', retrying in {:?}", query, self.rate_limit_backoff);
                tokio::time::sleep(self.rate_limit_backoff).await;
                let retry = self.provider.search_by_keyword(query).await?;
                self.films_from(retry)
            }
            reply => self.films_from(reply),
        };

        Ok(self.cap(films))
    }

    /// `search` with failures folded into a single NotFound candidate
    /// carrying a user-facing explanation
    pub async fn search_for_display(&self, query: &str) -> Vec<FilmCandidate> {
        match self.search(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Film lookup for '{}' failed ({:?}): {}", query, e.kind(), e);
                vec![FilmCandidate::with_message(e.user_message())]
            }
        }
    }

    fn films_from(&self, reply: ProviderReply) -> Vec<FilmDetails> {
        match reply {
            ProviderReply::Films(films) => films,
            ProviderReply::RateLimited => {
                warn!("Kinopoisk still rate limited after retry");
                Vec::new()
            }
            ProviderReply::Unauthorized(status) => {
                error!("Invalid Kinopoisk API key (HTTP {})", status);
                Vec::new()
            }
            ProviderReply::Status(status) => {
                error!("Kinopoisk API error: HTTP {}", status);
                Vec::new()
            }
        }
    }

    fn cap(&self, films: Vec<FilmDetails>) -> Vec<FilmCandidate> {
        if films.is_empty() {
            info!("Kinopoisk returned no films");
            return vec![FilmCandidate::not_found()];
        }

        films
            .into_iter()
            .take(self.movie_cap.max(1))
            .map(FilmCandidate::Found)
            .collect()
    }
}
