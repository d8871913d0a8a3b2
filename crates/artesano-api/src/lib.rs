// artesano-api: Async Rust client for the Artesano catalog REST API.
//
// Covers the `/feedstocks` and `/products` resources: paginated listing with
// search, single-record reads, and create/update/delete.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ArtesanoClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
