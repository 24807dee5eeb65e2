pub mod client;

pub use client::{parse_search_response, KinopoiskClient, MetadataProvider, ProviderReply};

#[cfg(test)]
pub use client::MockMetadataProvider;
