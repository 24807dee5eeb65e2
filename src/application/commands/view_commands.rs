// src/application/commands/view_commands.rs

use crate::application::state::AppState;
use crate::domain::navigation::NavigationContext;
use crate::domain::{DisplayPayload, UserId};
use crate::error::AppResult;

/// /history - snapshot the user's searches and open the first page
pub async fn show_history(state: &AppState, user_id: UserId) -> AppResult<DisplayPayload> {
    let records = state.history_service.history(user_id).await?;
    let context = state
        .sessions
        .enter(user_id, NavigationContext::history(records))
        .await;
    Ok(state.presenter.render(context).await)
}

/// /stats - snapshot the user's film counts and open the first page
pub async fn show_stats(state: &AppState, user_id: UserId) -> AppResult<DisplayPayload> {
    let stats = state.history_service.stats(user_id).await?;
    let context = state
        .sessions
        .enter(user_id, NavigationContext::stats(stats))
        .await;
    Ok(state.presenter.render(context).await)
}
