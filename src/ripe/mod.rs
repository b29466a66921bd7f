//! RIPEstat routing registry access.
//!
//! - [`client`] - HTTPS requests with an explicit TLS policy
//! - [`extract`] - Pulling prefix strings out of the JSON payload

mod client;
mod extract;

// Re-export public types and functions
pub use client::RegistryClient;
pub use extract::{
    extract_prefixes, harvest_prefixes, AnnouncedPrefix, AnnouncedPrefixesData,
    AnnouncedPrefixesResponse,
};
