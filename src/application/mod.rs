// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the messaging transport and the services
// - Turns updates into commands and commands into rendered pages
// - Owns no state beyond what AppState hands it

pub mod commands;
pub mod copy;
pub mod dispatcher;
pub mod poller;
pub mod presenter;
pub mod state;

pub use dispatcher::{Command, Dispatcher};
pub use poller::Poller;
pub use presenter::Presenter;
pub use state::AppState;
