//! Data bridge: connects [`Catalog`] store streams to TUI actions.
//!
//! Runs as a background task that forwards every page/status change of
//! either resource as an [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use artesano_core::Catalog;

use crate::action::Action;

/// Forward store snapshots to the TUI until cancelled or the store is gone.
pub async fn spawn_data_bridge(
    catalog: Catalog,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut feedstocks = catalog.feedstocks();
    let mut products = catalog.products();

    // Push initial snapshots so screens render the current state
    let _ = action_tx.send(Action::FeedstocksUpdated(feedstocks.current().clone()));
    let _ = action_tx.send(Action::ProductsUpdated(products.current().clone()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = feedstocks.changed() => {
                let Some(state) = changed else { break };
                debug!(status = %state.status, items = state.items.len(), "dispatching FeedstocksUpdated");
                let _ = action_tx.send(Action::FeedstocksUpdated(state));
            }
            changed = products.changed() => {
                let Some(state) = changed else { break };
                debug!(status = %state.status, items = state.items.len(), "dispatching ProductsUpdated");
                let _ = action_tx.send(Action::ProductsUpdated(state));
            }
        }
    }

    debug!("data bridge shut down");
}
