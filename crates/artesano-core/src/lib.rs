//! Reactive catalog layer between `artesano-api` and the UI consumers
//! (CLI / TUI).
//!
//! - **[`Catalog`]**: facade owning the HTTP client and the store. Reads
//!   run as sequenced fetches; writes go through a [`Command`] channel to a
//!   background processor. [`Catalog::oneshot()`] suits single CLI calls.
//!
//! - **[`CatalogStore`]**: per-resource page cache (`DashMap` index +
//!   `tokio::sync::watch` snapshot) with an `Idle → Loading → Loaded |
//!   Errored` status each. Responses to superseded fetches are discarded.
//!
//! - **[`capacity`]** and **[`guard`]**: the production-capacity
//!   calculation and the feedstock delete safety lock.
//!
//! - **[`listing`]** and **[`form`]**: list-screen state (search, paging,
//!   post-delete navigation) and creation-modal form state.

pub mod capacity;
pub mod catalog;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod guard;
pub mod listing;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use artesano_api::types::SearchType;
pub use catalog::Catalog;
pub use command::{Command, CommandResult, CompositionInput, FeedstockRequest, ProductRequest};
pub use config::{CatalogConfig, TlsVerification};
pub use error::CoreError;
pub use form::{FeedstockForm, Modal, ProductForm};
pub use listing::{AfterDelete, ListQuery, ListView};
pub use store::{CatalogStore, ResourceState, ResourceStatus};
pub use stream::ResourceStream;

pub use model::{
    CompositionLine, EntityId, Feedstock, Page, Product, ProductUsage, UnitOfMeasure,
};
