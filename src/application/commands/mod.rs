// src/application/commands/mod.rs
//
// Bot Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the dispatcher and the services
// - Commands return a rendered DisplayPayload; delivery is not their job
// - Commands NEVER contain business logic

pub mod bot_commands;
pub mod navigation_commands;
pub mod search_commands;
pub mod view_commands;

pub use bot_commands::*;
pub use navigation_commands::*;
pub use search_commands::*;
pub use view_commands::*;
