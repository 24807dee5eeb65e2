// src/services/link_resolver.rs
//
// Link Resolver - film → streaming links
//
// ORDER:
// 1. Primary: built from the provider id, no network
// 2. Secondary: catalogue search by title + year, first fuzzy match wins
//
// Secondary failures never reach the caller. Called only for the candidate
// that is about to be shown.

use std::sync::Arc;

use log::{debug, warn};

use crate::domain::film::{FilmCandidate, FilmDetails, StreamingLink};
use crate::integrations::filmix::LinkSearchSource;

pub const PRIMARY_LINK_BASE: &str = "https://sspoisk.ru/";
pub const DEFAULT_LINKS_CAP: usize = 1;

/// Catalogue titles scoring below this are someone else's film
pub const MIN_SIMILARITY: u32 = 30;

/// Case-insensitive similarity on a 0-100 scale: `2 * LCS / (len_a + len_b)`
/// over chars. Extra words in either title cost only their own length.
pub fn similarity_ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0;
    }
    let matched = 2 * longest_common_subsequence(&a, &b);
    ((matched as f64 / total as f64) * 100.0).round() as u32
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            row[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

pub struct LinkResolver {
    catalogue: Arc<dyn LinkSearchSource>,
    primary_base: String,
    links_cap: usize,
}

impl LinkResolver {
    pub fn new(catalogue: Arc<dyn LinkSearchSource>, links_cap: usize) -> Self {
        Self {
            catalogue,
            primary_base: PRIMARY_LINK_BASE.to_string(),
            links_cap,
        }
    }

    pub fn links_cap(&self) -> usize {
        self.links_cap
    }

    /// Links for a candidate, never more than `links_cap`
    pub async fn resolve(&self, candidate: &FilmCandidate) -> Vec<StreamingLink> {
        let Some(film) = candidate.details() else {
            return Vec::new();
        };

        let mut links = Vec::with_capacity(self.links_cap);

        if links.len() < self.links_cap {
            if let Some(link) = self.primary_link(film) {
                links.push(link);
            }
        }

        if links.len() < self.links_cap {
            if let Some(link) = self.secondary_link(film).await {
                links.push(link);
            }
        }

        links
    }

    fn primary_link(&self, film: &FilmDetails) -> Option<StreamingLink> {
        let id = film.provider_id?;
        Some(StreamingLink::primary(format!(
            "{}{}/{}/",
            self.primary_base,
            film.kind_segment(),
            id
        )))
    }

    async fn secondary_link(&self, film: &FilmDetails) -> Option<StreamingLink> {
        let title = film.display_name()?;
        let year = film.year.as_deref().unwrap_or_default();

        let hits = match self.catalogue.search(title, year).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Secondary link search for '{}' failed: {}", title, e);
                return None;
            }
        };

        let hit = hits.into_iter().find(|hit| {
            let ratio = similarity_ratio(&hit.title, title);
            debug!("'{}' vs '{}': similarity {}", hit.title, title, ratio);
            ratio >= MIN_SIMILARITY
        })?;

        Some(StreamingLink::secondary(hit.url))
    }
}
