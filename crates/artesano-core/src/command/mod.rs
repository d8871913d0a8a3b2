// ── Command API ──
//
// Every write against the backend flows through the `Command` enum and is
// executed by the catalog's command processor task.

pub mod requests;

use crate::error::CoreError;
use crate::model::{EntityId, Feedstock, Product};

pub use requests::{CompositionInput, FeedstockRequest, ProductRequest};

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All write operations against the catalog backend.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Feedstocks ───────────────────────────────────────────────────
    CreateFeedstock(FeedstockRequest),
    UpdateFeedstock {
        id: EntityId,
        request: FeedstockRequest,
    },
    /// Plain delete. The safety lock is applied by
    /// [`Catalog::delete_feedstock`](crate::Catalog::delete_feedstock)
    /// before this is sent.
    DeleteFeedstock { id: EntityId },

    // ── Products ─────────────────────────────────────────────────────
    CreateProduct(ProductRequest),
    UpdateProduct {
        id: EntityId,
        request: ProductRequest,
    },
    DeleteProduct { id: EntityId },
}

/// Result of a command execution.
#[derive(Debug)]
pub enum CommandResult {
    Ok,
    Feedstock(Feedstock),
    Product(Product),
}
