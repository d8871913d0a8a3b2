// ── Command request types ──
//
// Validated inputs for create/update commands. Forms and CLI flags build
// these; `convert` turns them into wire bodies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{EntityId, Feedstock, Product, UnitOfMeasure};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedstockRequest {
    pub code: String,
    pub name: String,
    pub stock: Decimal,
    pub unit_of_measure: UnitOfMeasure,
}

impl FeedstockRequest {
    /// Start from an existing record, e.g. for a partial update.
    ///
    /// An unrecognized stored unit falls back to the default.
    pub fn from_existing(feedstock: &Feedstock) -> Self {
        Self {
            code: feedstock.code.clone(),
            name: feedstock.name.clone(),
            stock: feedstock.stock,
            unit_of_measure: feedstock.unit().unwrap_or_default(),
        }
    }
}

/// One `(feedstock, quantity per unit)` pair of a product request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionInput {
    pub feedstock_id: EntityId,
    pub quantity: Decimal,
}

impl CompositionInput {
    /// Lines naming no feedstock or consuming nothing are dropped before
    /// a request is sent.
    pub fn is_effective(&self) -> bool {
        self.feedstock_id.is_assigned() && self.quantity > Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub code: String,
    pub name: String,
    pub unit_price: Decimal,
    pub composition: Vec<CompositionInput>,
}

impl ProductRequest {
    pub fn from_existing(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            composition: product
                .composition
                .iter()
                .map(|line| CompositionInput {
                    feedstock_id: line.feedstock_id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }

    /// Keep only effective composition lines.
    #[must_use]
    pub fn without_empty_lines(mut self) -> Self {
        self.composition.retain(CompositionInput::is_effective);
        self
    }
}
