// src/application/commands/search_commands.rs

use log::{error, info};

use crate::application::state::AppState;
use crate::domain::navigation::NavigationContext;
use crate::domain::{DisplayPayload, UserId};

/// Free text - look the query up, open the results on the first film, and
/// record the search with that film.
///
/// Never fails: lookup problems render as a "not found" page and a failed
/// history write is only logged, the user still gets their results.
pub async fn search_film(state: &AppState, user_id: UserId, query: &str) -> DisplayPayload {
    let candidates = state.film_lookup.search_for_display(query).await;
    let shown = candidates.first().cloned();

    match shown.as_ref().and_then(|c| c.details()) {
        Some(film) => info!(
            "Found: {} ({}) for user {}",
            film.display_name().unwrap_or("?"),
            film.year.as_deref().unwrap_or("?"),
            user_id
        ),
        None => info!("Nothing found for '{}' (user {})", query, user_id),
    }

    let context = state
        .sessions
        .enter(user_id, NavigationContext::search(query, candidates))
        .await;
    let payload = state.presenter.render(context).await;

    // One row per search message. Films reached with the arrows are not
    // recorded, so stats count searches that opened on the film.
    if let Err(e) = state
        .history_service
        .record_search(user_id, query, shown.as_ref())
        .await
    {
        error!("Failed to record search '{}' for user {}: {}", query, user_id, e);
    }

    payload
}
