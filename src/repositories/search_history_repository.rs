// src/repositories/search_history_repository.rs
//
// Search history persistence
//
// rusqlite is blocking, so every operation checks out a pooled connection
// inside `spawn_blocking`. The connection goes back to the pool when the
// closure returns, on success and on error alike.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};

use crate::db::{get_connection, ConnectionPool};
use crate::domain::history::{rank_user_stats, NewSearchRecord, SearchRecord, UserStat};
use crate::domain::UserId;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchHistoryRepository: Send + Sync {
    /// Ensure the user exists, then append the search. Returns the new row id.
    async fn record(&self, search: NewSearchRecord) -> AppResult<i64>;

    /// Searches newest first; `None` returns all of them
    async fn history(&self, user_id: UserId, limit: Option<usize>) -> AppResult<Vec<SearchRecord>>;

    /// Resolved films grouped by (name, year), most frequent first
    async fn stats(&self, user_id: UserId) -> AppResult<Vec<UserStat>>;
}

pub struct SqliteSearchHistoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSearchHistoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run `op` on a pooled connection off the async runtime
    async fn with_connection<T, F>(&self, op: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            op(&conn)
        })
        .await?
    }

    fn insert_search(conn: &Connection, search: &NewSearchRecord, now: DateTime<Utc>) -> AppResult<i64> {
        conn.execute(
            "INSERT OR IGNORE INTO users (telegram_id) VALUES (?1)",
            params![search.user_id],
        )?;

        conn.execute(
            "INSERT INTO search_history (user_id, query, film_name, film_year, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                search.user_id,
                search.query,
                search.film_name,
                search.film_year,
                format_timestamp(now),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn select_history(conn: &Connection, user_id: UserId, limit: Option<usize>) -> AppResult<Vec<SearchRecord>> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let mut stmt = conn.prepare(
            "SELECT id, user_id, query, film_name, film_year, timestamp
             FROM search_history
             WHERE user_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2",
        )?;

        let records = stmt
            .query_map(params![user_id, limit], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn select_stats(conn: &Connection, user_id: UserId) -> AppResult<Vec<UserStat>> {
        // Groups come out in first-seen order; ranking by count is stable on top of that
        let mut stmt = conn.prepare(
            "SELECT film_name, film_year, COUNT(*) AS occurrences
             FROM search_history
             WHERE user_id = ?1 AND film_name IS NOT NULL AND film_year IS NOT NULL
             GROUP BY film_name, film_year
             ORDER BY MIN(id) ASC",
        )?;

        let stats = stmt
            .query_map(params![user_id], |row| {
                Ok(UserStat {
                    film_name: row.get("film_name")?,
                    film_year: row.get("film_year")?,
                    count: row.get::<_, i64>("occurrences")? as u32,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rank_user_stats(stats))
    }

    /// Map database row to SearchRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_record(row: &Row) -> Result<SearchRecord, rusqlite::Error> {
        let timestamp_str: String = row.get("timestamp")?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Invalid timestamp '{}': {}", timestamp_str, e),
                    )),
                )
            })?;

        Ok(SearchRecord {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            query: row.get("query")?,
            film_name: row.get("film_name")?,
            film_year: row.get("film_year")?,
            timestamp,
        })
    }
}

/// Fixed-width UTC timestamps so text ordering matches time ordering
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl SearchHistoryRepository for SqliteSearchHistoryRepository {
    async fn record(&self, search: NewSearchRecord) -> AppResult<i64> {
        self.with_connection(move |conn| Self::insert_search(conn, &search, Utc::now()))
            .await
    }

    async fn history(&self, user_id: UserId, limit: Option<usize>) -> AppResult<Vec<SearchRecord>> {
        self.with_connection(move |conn| Self::select_history(conn, user_id, limit))
            .await
    }

    async fn stats(&self, user_id: UserId) -> AppResult<Vec<UserStat>> {
        self.with_connection(move |conn| Self::select_stats(conn, user_id))
            .await
    }
}
