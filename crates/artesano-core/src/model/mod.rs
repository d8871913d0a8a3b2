// ── Catalog domain model ──
//
// Canonical representations of the backend's records. The CLI and TUI
// depend on these, never on the wire types in `artesano_api::types`.

pub mod entity_id;
pub mod feedstock;
pub mod product;
pub mod unit;

use serde::{Deserialize, Serialize};

pub use entity_id::EntityId;
pub use feedstock::{Feedstock, ProductUsage};
pub use product::{CompositionLine, Product};
pub use unit::UnitOfMeasure;

/// One page of a listing, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            size,
        }
    }
}

/// Anything the store can index by id.
pub trait Keyed {
    fn key(&self) -> EntityId;
}

impl Keyed for Feedstock {
    fn key(&self) -> EntityId {
        self.id
    }
}

impl Keyed for Product {
    fn key(&self) -> EntityId {
        self.id
    }
}
