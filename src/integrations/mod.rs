// src/integrations/mod.rs
//
// External Integrations Module
//
// - kinopoisk: film metadata provider
// - filmix: third-party catalogue searched for secondary links
// - telegram: messaging transport

pub mod filmix;
pub mod kinopoisk;
pub mod telegram;

pub use filmix::{CatalogueHit, FilmixClient, LinkSearchSource};
pub use kinopoisk::{KinopoiskClient, MetadataProvider, ProviderReply};
pub use telegram::{Messenger, MessageRef, TelegramClient, Update};
