use serde::{Deserialize, Serialize};

/// Message carried by the sentinel candidate when the provider returned nothing.
pub const FILM_NOT_FOUND_MESSAGE: &str = "Фильм не найден!";

/// One result of a metadata lookup.
///
/// Either the provider gave us a film record, or the lookup produced nothing
/// displayable and we carry a user-facing message instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FilmCandidate {
    Found(FilmDetails),
    NotFound { message: String },
}

/// Film or series record as returned by the metadata provider.
/// Every field except `is_series` may be missing in provider responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmDetails {
    /// Provider-side identifier
    pub provider_id: Option<i64>,

    /// Russian title
    pub name_ru: Option<String>,

    /// English / original title
    pub name_en: Option<String>,

    /// Release year as text ("2014", "2011-2019" for series)
    pub year: Option<String>,

    pub rating: Option<Rating>,

    pub description: Option<String>,

    /// Poster preview URL
    pub poster_url: Option<String>,

    pub is_series: bool,
}

/// Provider rating. `Unrated` is what the provider reports for titles it has
/// not scored yet, which is different from the field being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Score(String),
    Unrated,
}

impl FilmCandidate {
    pub fn not_found() -> Self {
        Self::with_message(FILM_NOT_FOUND_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        FilmCandidate::NotFound {
            message: message.into(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FilmCandidate::Found(_))
    }

    pub fn details(&self) -> Option<&FilmDetails> {
        match self {
            FilmCandidate::Found(details) => Some(details),
            FilmCandidate::NotFound { .. } => None,
        }
    }
}

impl FilmDetails {
    /// Localized name, falling back to the English one
    pub fn display_name(&self) -> Option<&str> {
        self.name_ru
            .as_deref()
            .or(self.name_en.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    /// Name and year used when recording a resolved search.
    /// Both must be present for the search to count as resolved.
    pub fn resolved_identity(&self) -> Option<(String, String)> {
        let name = self.display_name()?;
        let year = self.year.as_deref().filter(|y| !y.trim().is_empty())?;
        Some((name.to_string(), year.to_string()))
    }

    pub fn score(&self) -> Option<&str> {
        match &self.rating {
            Some(Rating::Score(score)) => Some(score.as_str()),
            _ => None,
        }
    }

    /// Path segment used by link sources to distinguish series from films
    pub fn kind_segment(&self) -> &'static str {
        if self.is_series {
            "series"
        } else {
            "film"
        }
    }
}

impl Rating {
    /// Provider sends the literal string "null" for titles without a rating.
    pub fn from_provider(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.eq_ignore_ascii_case("null") {
            Some(Rating::Unrated)
        } else {
            Some(Rating::Score(trimmed.to_string()))
        }
    }
}

/// Where a streaming link came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSource {
    /// Built directly from the provider id
    Primary,
    /// Found by searching a third-party catalogue
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingLink {
    pub url: String,
    pub source: LinkSource,
}

impl StreamingLink {
    pub fn primary(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: LinkSource::Primary,
        }
    }

    pub fn secondary(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: LinkSource::Secondary,
        }
    }
}

impl std::fmt::Display for LinkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkSource::Primary => write!(f, "primary"),
            LinkSource::Secondary => write!(f, "secondary"),
        }
    }
}
