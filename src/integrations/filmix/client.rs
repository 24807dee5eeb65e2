// src/integrations/filmix/client.rs
//
// Filmix catalogue search
//
// ARCHITECTURE:
// - Single AJAX search endpoint, form-encoded POST, HTML fragment back
// - Returns every listing hit in page order; matching is the caller's job
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Non-2xx statuses are errors here; the caller decides whether they matter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use super::parser::ListingParser;
use crate::error::{AppError, AppResult};

pub const FILMIX_SEARCH_URL: &str = "https://filmix.date/engine/ajax/sphinx_search.php";
pub const FILMIX_PLAY_URL: &str = "https://filmix.date/play/";

/// A catalogue hit with its playable URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueHit {
    pub title: String,
    pub url: String,
}

/// Third-party catalogue searched by title
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkSearchSource: Send + Sync {
    /// Search by title and year (empty when unknown), hits in listing order
    async fn search(&self, title: &str, year: &str) -> AppResult<Vec<CatalogueHit>>;
}

pub struct FilmixClient {
    search_url: String,
    play_url: String,
    http_client: Client,
    parser: ListingParser,
}

impl FilmixClient {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            search_url: FILMIX_SEARCH_URL.to_string(),
            play_url: FILMIX_PLAY_URL.to_string(),
            http_client,
            parser: ListingParser::default(),
        })
    }

    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Turn a raw listing into hits with absolute play URLs
    pub fn hits_from_listing(&self, html: &str) -> Vec<CatalogueHit> {
        self.parser
            .parse(html)
            .into_iter()
            .map(|entry| CatalogueHit {
                url: format!("{}{}", self.play_url, entry.id),
                title: entry.title,
            })
            .collect()
    }
}

/// Form fields the search endpoint expects. Year bounds pin the search to the
/// release year; rating bounds are left wide open.
pub fn search_form(title: &str, year: &str) -> Vec<(&'static str, String)> {
    let story = format!("{} {}", title, year).trim().to_string();

    vec![
        ("scf", "fx".to_string()),
        ("story", story),
        ("search_start", "0".to_string()),
        ("do", "search".to_string()),
        ("subaction", "search".to_string()),
        ("years_ot", year.to_string()),
        ("years_do", year.to_string()),
        ("kpi_ot", "1".to_string()),
        ("kpi_do", "10".to_string()),
        ("imdb_ot", "1".to_string()),
        ("imdb_do", "10".to_string()),
        ("sort_name", String::new()),
        ("undefined", "asc".to_string()),
        ("sort_date", String::new()),
        ("sort_favorite", String::new()),
        ("simple", "1".to_string()),
    ]
}

#[async_trait]
impl LinkSearchSource for FilmixClient {
    async fn search(&self, title: &str, year: &str) -> AppResult<Vec<CatalogueHit>> {
        let response = self
            .http_client
            .post(&self.search_url)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(header::ACCEPT, "text/html")
            .form(&search_form(title, year))
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Filmix request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "Filmix search returned HTTP {}",
                status.as_u16()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Filmix body read failed: {}", e)))?;

        Ok(self.hits_from_listing(&html))
    }
}
