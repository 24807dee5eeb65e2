// src/application/commands/navigation_commands.rs

use log::info;

use crate::application::copy;
use crate::application::state::AppState;
use crate::domain::navigation::{ContextKind, NavAction};
use crate::domain::{DisplayPayload, UserId};
use crate::error::AppResult;

use super::view_commands::{show_history, show_stats};

/// Previous/next button. Moves the user's open view and renders the new page.
///
/// When the view is gone (evicted, or replaced by another view) history and
/// stats are reopened from the repository; search results cannot be rebuilt
/// without re-querying, so the user is asked to search again.
pub async fn navigate(state: &AppState, user_id: UserId, action: NavAction) -> AppResult<DisplayPayload> {
    if let Some(context) = state.sessions.navigate(user_id, action).await {
        return Ok(state.presenter.render(context).await);
    }

    info!("No open {} view for user {}, reopening", action.kind.as_str(), user_id);
    match action.kind {
        ContextKind::History => show_history(state, user_id).await,
        ContextKind::Stats => show_stats(state, user_id).await,
        ContextKind::Search => Ok(DisplayPayload::text(copy::STALE_SEARCH)),
    }
}
