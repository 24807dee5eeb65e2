pub mod client;
pub mod parser;

pub use client::{CatalogueHit, FilmixClient, LinkSearchSource};
pub use parser::{ListingEntry, ListingParser};

#[cfg(test)]
pub use client::MockLinkSearchSource;
