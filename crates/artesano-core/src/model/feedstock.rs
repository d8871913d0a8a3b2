// ── Feedstock domain type ──

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::unit::UnitOfMeasure;

/// A raw material tracked by stock on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedstock {
    pub id: EntityId,
    /// Business key (e.g. `"MDF-18"`), unique per catalog.
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock: Decimal,
    /// Unit tag as stored by the backend. See [`Feedstock::unit`].
    pub unit_of_measure: String,
    /// Products whose composition references this feedstock.
    pub products: Vec<ProductUsage>,
}

impl Feedstock {
    /// Whether any product still consumes this feedstock.
    pub fn is_in_use(&self) -> bool {
        !self.products.is_empty()
    }

    pub fn dependent_count(&self) -> usize {
        self.products.len()
    }

    /// Parsed unit, or `None` when the backend holds a value outside the
    /// known set.
    pub fn unit(&self) -> Option<UnitOfMeasure> {
        self.unit_of_measure.parse().ok()
    }
}

/// Back-reference from a feedstock to a consuming product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUsage {
    pub product_id: EntityId,
    pub product_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Amount of the feedstock one unit of the product consumes.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}
