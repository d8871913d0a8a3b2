// ── Reactive catalog store ──
//
// Per-resource page cache with push-based change notification.

mod catalog_store;
mod collection;

pub use catalog_store::CatalogStore;
pub use collection::{FetchTicket, ResourceState, ResourceStatus};
