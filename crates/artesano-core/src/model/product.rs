// ── Product domain type ──

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use crate::capacity;

/// A finished good built from one or more feedstocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    /// Business key (e.g. `"MESA-01"`), unique per catalog.
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Ordered composition lines, as returned by the backend.
    pub composition: Vec<CompositionLine>,
}

impl Product {
    /// Whole units buildable from current feedstock stock.
    pub fn possible_units(&self) -> i64 {
        capacity::possible_units(&self.composition)
    }

    /// The composition line that limits [`possible_units`](Self::possible_units).
    pub fn bottleneck(&self) -> Option<&CompositionLine> {
        capacity::bottleneck(&self.composition)
    }
}

/// One feedstock in a product's bill of materials, with the feedstock's
/// stock snapshotted at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionLine {
    pub feedstock_id: EntityId,
    pub feedstock_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock: Decimal,
    /// Feedstock consumed per unit of product.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}
