// src/application/commands/bot_commands.rs

use crate::application::copy;
use crate::domain::DisplayPayload;

/// /start
pub fn start() -> DisplayPayload {
    DisplayPayload::text(copy::START_MESSAGE)
}

/// /help
pub fn help() -> DisplayPayload {
    DisplayPayload::text(copy::HELP_MESSAGE)
}
