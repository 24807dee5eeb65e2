pub mod client;
pub mod types;

pub use client::{Messenger, TelegramClient};
pub use types::{CallbackQuery, Message, MessageRef, Update, User};

#[cfg(test)]
pub use client::MockMessenger;
