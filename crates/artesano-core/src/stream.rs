// ── Reactive resource streams ──
//
// Subscription handles for consuming page changes from the CatalogStore.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::ResourceState;

/// A subscription to one resource's cached page.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct ResourceStream<T: Send + Sync + 'static> {
    current: ResourceState<T>,
    receiver: watch::Receiver<ResourceState<T>>,
}

impl<T: Send + Sync + 'static> ResourceStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<ResourceState<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &ResourceState<T> {
        &self.current
    }

    /// The latest snapshot (may have changed since creation).
    pub fn latest(&self) -> ResourceState<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<ResourceState<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> ResourceWatchStream<T> {
        ResourceWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct ResourceWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<ResourceState<T>>,
}

impl<T: Send + Sync + 'static> Stream for ResourceWatchStream<T> {
    type Item = ResourceState<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_pending, assert_ready, task};

    use crate::model::Page;
    use crate::store::{CatalogStore, ResourceStatus};

    #[test]
    fn changed_wakes_on_store_update() {
        let store = CatalogStore::new();
        let mut stream = store.subscribe_products();
        assert_eq!(stream.current().status, ResourceStatus::Idle);

        let mut changed = task::spawn(stream.changed());
        assert_pending!(changed.poll());

        let ticket = store.begin_product_fetch();
        assert!(changed.is_woken());
        let snap = assert_ready!(changed.poll());
        assert_eq!(snap.map(|s| s.status), Some(ResourceStatus::Loading));
        drop(changed);

        store.apply_product_page(ticket, Page::empty(0, 5));
        assert_eq!(stream.latest().status, ResourceStatus::Loaded);
    }

    #[test]
    fn stale_page_does_not_notify() {
        let store = CatalogStore::new();
        let old = store.begin_feedstock_fetch();
        let _new = store.begin_feedstock_fetch();
        let mut stream = store.subscribe_feedstocks();

        let mut changed = task::spawn(stream.changed());
        assert_pending!(changed.poll());
        store.apply_feedstock_page(old, Page::empty(3, 10));
        assert!(!changed.is_woken());
    }
}
