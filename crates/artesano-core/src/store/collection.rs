// ── Reactive page collection ──
//
// Holds the last-fetched page of one resource kind with an id index, and
// pushes every change to subscribers through a `watch` channel. Fetches
// are sequenced: a response only lands if it answers the newest request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::debug;

use crate::model::{EntityId, Keyed, Page};

/// Lifecycle of one resource's cached page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum ResourceStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Snapshot broadcast to subscribers.
#[derive(Debug)]
pub struct ResourceState<T> {
    pub items: Arc<Vec<Arc<T>>>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub status: ResourceStatus,
}

// Manual impls: `Arc<T>` clones without `T: Clone`.
impl<T> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            total: self.total,
            page: self.page,
            size: self.size,
            status: self.status,
        }
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            total: 0,
            page: 0,
            size: 0,
            status: ResourceStatus::Idle,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == ResourceStatus::Loading
    }
}

/// Proof that a fetch was started; hand it back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn seq(self) -> u64 {
        self.seq
    }
}

pub(crate) struct PageCollection<T: Keyed + Send + Sync + 'static> {
    /// Id → entity for the rows on the current page.
    by_id: DashMap<EntityId, Arc<T>>,

    /// Sequence number of the newest fetch issued.
    latest_seq: AtomicU64,

    /// Current page snapshot and status.
    state: watch::Sender<ResourceState<T>>,
}

impl<T: Keyed + Send + Sync + 'static> PageCollection<T> {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            by_id: DashMap::new(),
            latest_seq: AtomicU64::new(0),
            state,
        }
    }

    /// Mark the resource as loading and issue a ticket newer than every
    /// ticket handed out before.
    pub(crate) fn begin_fetch(&self) -> FetchTicket {
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.status = ResourceStatus::Loading);
        FetchTicket { seq }
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.seq == self.latest_seq.load(Ordering::SeqCst)
    }

    /// Replace the cached page. Returns `false` (and changes nothing) when
    /// a newer fetch has been issued since `ticket`.
    pub(crate) fn apply_page(&self, ticket: FetchTicket, page: Page<T>) -> bool {
        self.state.send_if_modified(move |s| {
            if !self.is_current(ticket) {
                debug!(seq = ticket.seq, "discarding stale page");
                return false;
            }
            let items: Vec<Arc<T>> = page.items.into_iter().map(Arc::new).collect();
            self.by_id.clear();
            for item in &items {
                self.by_id.insert(item.key(), Arc::clone(item));
            }
            s.items = Arc::new(items);
            s.total = page.total;
            s.page = page.page;
            s.size = page.size;
            s.status = ResourceStatus::Loaded;
            true
        })
    }

    /// Record a failed fetch. Items stay as they were.
    pub(crate) fn apply_failure(&self, ticket: FetchTicket) -> bool {
        self.state.send_if_modified(|s| {
            if !self.is_current(ticket) {
                debug!(seq = ticket.seq, "discarding stale failure");
                return false;
            }
            s.status = ResourceStatus::Errored;
            true
        })
    }

    /// Put a freshly created entity at the head of the cached page.
    pub(crate) fn prepend(&self, entity: T) {
        let entity = Arc::new(entity);
        self.by_id.insert(entity.key(), Arc::clone(&entity));
        self.state.send_modify(|s| {
            let mut items = Vec::with_capacity(s.items.len() + 1);
            items.push(entity);
            items.extend(s.items.iter().cloned());
            s.items = Arc::new(items);
            s.total += 1;
        });
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<Arc<T>> {
        self.by_id.get(&id).map(|r| Arc::clone(r.value()))
    }

    pub(crate) fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }
}
