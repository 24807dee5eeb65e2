use super::entity::NewSearchRecord;
use crate::domain::{DomainError, DomainResult};

/// Validates a search before it is appended to the history
pub fn validate_search_record(record: &NewSearchRecord) -> DomainResult<()> {
    validate_query(&record.query)?;
    validate_resolution(record)?;
    Ok(())
}

fn validate_query(query: &str) -> DomainResult<()> {
    if query.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Search query cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Name and year are recorded together or not at all
fn validate_resolution(record: &NewSearchRecord) -> DomainResult<()> {
    if record.film_name.is_some() != record.film_year.is_some() {
        return Err(DomainError::InvariantViolation(format!(
            "Search '{}' has a partial resolution (name: {:?}, year: {:?})",
            record.query, record.film_name, record.film_year
        )));
    }
    Ok(())
}

/// Invariants that must hold for search history:
///
/// 1. Records are append-only
/// 2. Query text is never empty
/// 3. A record is resolved (name + year) or unresolved (neither)
/// 4. Unresolved records count in history, never in statistics
