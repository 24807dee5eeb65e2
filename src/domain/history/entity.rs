use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// A persisted search. Append-only: the bot never edits or deletes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: i64,
    pub user_id: UserId,
    pub query: String,
    /// Resolved film name, `None` when the query found nothing
    pub film_name: Option<String>,
    pub film_year: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A search about to be recorded
#[derive(Debug, Clone, PartialEq)]
pub struct NewSearchRecord {
    pub user_id: UserId,
    pub query: String,
    pub film_name: Option<String>,
    pub film_year: Option<String>,
}

/// How many times a film was shown to a user. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStat {
    pub film_name: String,
    pub film_year: String,
    pub count: u32,
}

impl SearchRecord {
    pub fn is_resolved(&self) -> bool {
        self.film_name.is_some() && self.film_year.is_some()
    }
}

impl NewSearchRecord {
    pub fn unresolved(user_id: UserId, query: impl Into<String>) -> Self {
        Self {
            user_id,
            query: query.into(),
            film_name: None,
            film_year: None,
        }
    }

    pub fn resolved(
        user_id: UserId,
        query: impl Into<String>,
        film_name: impl Into<String>,
        film_year: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            query: query.into(),
            film_name: Some(film_name.into()),
            film_year: Some(film_year.into()),
        }
    }
}

/// Order grouped stats by count, most frequent first.
///
/// The sort is stable, so films with equal counts keep the order in which the
/// grouping produced them (first seen first).
pub fn rank_user_stats(mut stats: Vec<UserStat>) -> Vec<UserStat> {
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(name: &str, count: u32) -> UserStat {
        UserStat {
            film_name: name.to_string(),
            film_year: "2000".to_string(),
            count,
        }
    }

    #[test]
    fn test_rank_orders_by_count_descending() {
        let ranked = rank_user_stats(vec![stat("B", 3), stat("A", 5)]);
        assert_eq!(ranked[0].film_name, "A");
        assert_eq!(ranked[1].film_name, "B");
    }

    #[test]
    fn test_rank_keeps_first_seen_order_on_ties() {
        let ranked = rank_user_stats(vec![stat("first", 2), stat("top", 4), stat("second", 2)]);
        let names: Vec<&str> = ranked.iter().map(|s| s.film_name.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_unresolved_constructor() {
        let record = NewSearchRecord::unresolved(7, "asdfgh");
        assert!(record.film_name.is_none());
        assert!(record.film_year.is_none());
    }
}
