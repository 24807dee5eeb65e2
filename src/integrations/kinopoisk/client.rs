// src/integrations/kinopoisk/client.rs
//
// Kinopoisk Unofficial API integration
//
// ARCHITECTURE:
// - REST client for the keyword search endpoint
// - Classifies HTTP statuses, leaves retry policy to the caller
// - Maps provider JSON → FilmDetails (NO persistence, NO rendering)
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Transport and malformed-body failures are returned as errors,
//   never folded into an empty result

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Deserializer};

use crate::domain::film::{FilmDetails, Rating};
use crate::error::{AppError, AppResult};

pub const KINOPOISK_API_URL: &str =
    "https://kinopoiskapiunofficial.tech/api/v2.1/films/search-by-keyword";

/// Provider `type` values that denote series rather than single films
const SERIES_TYPES: [&str; 3] = ["TV_SERIES", "MINI_SERIES", "TV_SHOW"];

/// Outcome of one keyword search request, classified by HTTP status
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// 200 with a parsed body (possibly empty)
    Films(Vec<FilmDetails>),
    /// 429
    RateLimited,
    /// 401 / 403
    Unauthorized(u16),
    /// Any other non-200 status
    Status(u16),
}

/// Source of film metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the first page of keyword search results
    async fn search_by_keyword(&self, keyword: &str) -> AppResult<ProviderReply>;
}

/// Keyword search response body
#[derive(Debug, Deserialize)]
struct KeywordSearchResponse {
    #[serde(default)]
    films: Vec<FilmData>,
}

/// Film entry from the provider
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilmData {
    film_id: Option<i64>,
    name_ru: Option<String>,
    name_en: Option<String>,
    #[serde(rename = "type")]
    film_type: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    year: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    rating: Option<String>,
    poster_url: Option<String>,
    poster_url_preview: Option<String>,
}

/// The provider is inconsistent about quoting numbers
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Kinopoisk API Client
pub struct KinopoiskClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl KinopoiskClient {
    /// Create a new client. `timeout` bounds every request end to end.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: KINOPOISK_API_URL.to_string(),
            api_key: api_key.into(),
            http_client,
        })
    }

    /// Point the client at another endpoint (self-hosted proxy, test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map FilmData to FilmDetails
    fn map_film(film: FilmData) -> FilmDetails {
        let is_series = film
            .film_type
            .as_deref()
            .is_some_and(|t| SERIES_TYPES.contains(&t));

        FilmDetails {
            provider_id: film.film_id,
            name_ru: film.name_ru,
            name_en: film.name_en,
            year: film.year,
            rating: film.rating.as_deref().and_then(Rating::from_provider),
            description: film.description,
            poster_url: film.poster_url_preview.or(film.poster_url),
            is_series,
        }
    }
}

/// Parse a keyword search body, preserving provider order
pub fn parse_search_response(body: &str) -> AppResult<Vec<FilmDetails>> {
    let response: KeywordSearchResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Parse(format!("Failed to parse Kinopoisk response: {}", e)))?;

    Ok(response
        .films
        .into_iter()
        .map(KinopoiskClient::map_film)
        .collect())
}

#[async_trait]
impl MetadataProvider for KinopoiskClient {
    async fn search_by_keyword(&self, keyword: &str) -> AppResult<ProviderReply> {
        let response = self
            .http_client
            .get(&self.base_url)
            .header("X-API-KEY", &self.api_key)
            .header(header::ACCEPT, "application/json")
            .query(&[("keyword", keyword), ("page", "1")])
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Kinopoisk request failed: {}", e)))?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| AppError::Transport(format!("Kinopoisk body read failed: {}", e)))?;
                Ok(ProviderReply::Films(parse_search_response(&body)?))
            }
            StatusCode::TOO_MANY_REQUESTS => Ok(ProviderReply::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Ok(ProviderReply::Unauthorized(status.as_u16()))
            }
            other => Ok(ProviderReply::Status(other.as_u16())),
        }
    }
}
