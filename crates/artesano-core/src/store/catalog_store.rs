// ── Central catalog store ──
//
// One page cache per resource kind. Each kind has its own status and its
// own fetch sequence, so a slow product fetch never masks a feedstock one.

use std::sync::Arc;

use super::collection::{FetchTicket, PageCollection, ResourceState};
use crate::model::{EntityId, Feedstock, Page, Product};
use crate::stream::ResourceStream;

/// Client-side cache of the most recently fetched page of each resource.
///
/// Disposable: the backend owns the data, every mutation is followed by a
/// refetch. The only local write is prepending a confirmed new feedstock.
pub struct CatalogStore {
    pub(crate) feedstocks: PageCollection<Feedstock>,
    pub(crate) products: PageCollection<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            feedstocks: PageCollection::new(),
            products: PageCollection::new(),
        }
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────

    pub fn begin_feedstock_fetch(&self) -> FetchTicket {
        self.feedstocks.begin_fetch()
    }

    /// Returns `false` if the page was stale and discarded.
    pub fn apply_feedstock_page(&self, ticket: FetchTicket, page: Page<Feedstock>) -> bool {
        self.feedstocks.apply_page(ticket, page)
    }

    pub fn fail_feedstock_fetch(&self, ticket: FetchTicket) -> bool {
        self.feedstocks.apply_failure(ticket)
    }

    pub fn begin_product_fetch(&self) -> FetchTicket {
        self.products.begin_fetch()
    }

    pub fn apply_product_page(&self, ticket: FetchTicket, page: Page<Product>) -> bool {
        self.products.apply_page(ticket, page)
    }

    pub fn fail_product_fetch(&self, ticket: FetchTicket) -> bool {
        self.products.apply_failure(ticket)
    }

    /// Show a just-created feedstock at the top of the cached page.
    pub fn prepend_feedstock(&self, feedstock: Feedstock) {
        self.feedstocks.prepend(feedstock);
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn feedstocks_snapshot(&self) -> ResourceState<Feedstock> {
        self.feedstocks.snapshot()
    }

    pub fn products_snapshot(&self) -> ResourceState<Product> {
        self.products.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn feedstock_by_id(&self, id: EntityId) -> Option<Arc<Feedstock>> {
        self.feedstocks.get(id)
    }

    pub fn product_by_id(&self, id: EntityId) -> Option<Arc<Product>> {
        self.products.get(id)
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_feedstocks(&self) -> ResourceStream<Feedstock> {
        ResourceStream::new(self.feedstocks.subscribe())
    }

    pub fn subscribe_products(&self) -> ResourceStream<Product> {
        ResourceStream::new(self.products.subscribe())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ResourceStatus;

    #[test]
    fn resources_track_status_independently() {
        let store = CatalogStore::new();
        let f = store.begin_feedstock_fetch();
        let _p = store.begin_product_fetch();

        assert!(store.apply_feedstock_page(f, Page::empty(0, 10)));
        assert_eq!(store.feedstocks_snapshot().status, ResourceStatus::Loaded);
        assert_eq!(store.products_snapshot().status, ResourceStatus::Loading);
    }

    #[test]
    fn sequences_are_per_resource() {
        let store = CatalogStore::new();
        let f = store.begin_feedstock_fetch();
        let _p1 = store.begin_product_fetch();
        let _p2 = store.begin_product_fetch();

        // Product fetches never make a feedstock ticket stale.
        assert!(store.apply_feedstock_page(f, Page::empty(0, 10)));
    }
}
