//! Wire types for the catalog REST API.
//!
//! All types match the JSON bodies of the `/feedstocks` and `/products`
//! endpoints. Field names use camelCase via `#[serde(rename_all = "camelCase")]`;
//! decimal amounts travel as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ── Pagination ───────────────────────────────────────────────────────

/// Generic pagination wrapper returned by both list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

/// Which field a product search matches against.
///
/// Forwarded verbatim as the `searchType` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Name,
    Feedstock,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Feedstock => "feedstock",
        }
    }
}

// ── Feedstocks ───────────────────────────────────────────────────────

/// Feedstock — from `GET /feedstocks` and `GET /feedstocks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedstockResponse {
    pub id: i64,
    pub feedstock_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock: Decimal,
    pub unit_of_measure: String,
    /// Products consuming this feedstock. Absent on some backends.
    #[serde(default)]
    pub products: Vec<FeedstockProductItem>,
}

/// Back-reference from a feedstock to a product that consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedstockProductItem {
    pub id: i64,
    pub product_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Amount of the feedstock consumed per unit of the product.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

/// Body for `POST /feedstocks` and `PUT /feedstocks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedstockCreateUpdate {
    pub feedstock_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock: Decimal,
    pub unit_of_measure: String,
}

// ── Products ─────────────────────────────────────────────────────────

/// Product — from `GET /products` and `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub feedstocks: Vec<ProductFeedstockItem>,
}

/// Composition line embedded in a product: the feedstock snapshot at read
/// time plus the per-unit quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFeedstockItem {
    /// Feedstock id.
    pub id: i64,
    #[serde(default)]
    pub feedstock_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

/// One `{feedstockId, quantity}` pair in a product request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedstockQuantity {
    pub feedstock_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateUpdate {
    pub product_code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub feedstocks: Vec<FeedstockQuantity>,
}
