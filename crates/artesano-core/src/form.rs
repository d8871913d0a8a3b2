// ── Creation forms ──
//
// Uncommitted form state for the feedstock and product modals. Fields are
// held as text, the way they were typed, and coerced on submit.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::command::{CompositionInput, FeedstockRequest, ProductRequest};
use crate::error::CoreError;
use crate::model::{EntityId, Feedstock, UnitOfMeasure};

/// Whether a modal is shown, and the form it holds while open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal<F> {
    #[default]
    Closed,
    Open(F),
}

impl<F> Modal<F> {
    pub fn open(&mut self, form: F) {
        *self = Self::Open(form);
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }
}

/// Parse a decimal the way a numeric input would accept it. A comma is
/// taken as the decimal separator.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, CoreError> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Decimal::from_str(&cleaned)
        .map_err(|_| CoreError::validation(format!("{field} must be a number, got \"{raw}\"")))
}

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(value.to_owned())
}

// ── Feedstock form ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedstockForm {
    pub code: String,
    pub name: String,
    pub stock: String,
    pub unit: UnitOfMeasure,
}

impl FeedstockForm {
    /// Coerce the fields into a request.
    pub fn to_request(&self) -> Result<FeedstockRequest, CoreError> {
        let stock = parse_decimal("Stock", &self.stock)?;
        if stock.is_sign_negative() && !stock.is_zero() {
            return Err(CoreError::validation("Stock cannot be negative"));
        }
        Ok(FeedstockRequest {
            code: required("Code", &self.code)?,
            name: required("Name", &self.name)?,
            stock,
            unit_of_measure: self.unit,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Product form ───────────────────────────────────────────────────

/// A composition line as entered, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub feedstock_id: EntityId,
    /// Display name of the chosen feedstock.
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub unit_price: String,
    pub lines: Vec<DraftLine>,
    /// Feedstock picked in the selector, waiting for a quantity.
    pub selected: Option<(EntityId, String)>,
    pub pending_quantity: String,
}

impl ProductForm {
    /// Pick a feedstock from the selector.
    pub fn select(&mut self, feedstock: &Feedstock) {
        self.selected = Some((feedstock.id, feedstock.name.clone()));
    }

    /// Add the selected feedstock with the pending quantity.
    ///
    /// Requires a selection and a quantity greater than zero; on success the
    /// selection and quantity are cleared.
    pub fn add_line(&mut self) -> Result<(), CoreError> {
        let Some((id, name)) = self.selected.clone() else {
            return Err(CoreError::validation("Select a feedstock first"));
        };
        let quantity = parse_decimal("Quantity", &self.pending_quantity)?;
        if quantity <= Decimal::ZERO {
            return Err(CoreError::validation("Quantity must be greater than zero"));
        }
        self.lines.push(DraftLine {
            feedstock_id: id,
            name,
            quantity: quantity.normalize().to_string(),
        });
        self.selected = None;
        self.pending_quantity.clear();
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> Option<DraftLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Submit is enabled once at least one line exists.
    pub fn can_submit(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Coerce the fields into a request, dropping lines with no feedstock
    /// or a non-positive quantity. Unparseable quantities count as zero.
    pub fn to_request(&self) -> Result<ProductRequest, CoreError> {
        if !self.can_submit() {
            return Err(CoreError::validation(
                "Add at least one feedstock to the composition",
            ));
        }
        let unit_price = parse_decimal("Unit price", &self.unit_price)?;
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(CoreError::validation("Unit price cannot be negative"));
        }
        let composition = self
            .lines
            .iter()
            .map(|line| CompositionInput {
                feedstock_id: line.feedstock_id,
                quantity: parse_decimal("Quantity", &line.quantity).unwrap_or(Decimal::ZERO),
            })
            .collect();

        Ok(ProductRequest {
            code: required("Code", &self.code)?,
            name: required("Name", &self.name)?,
            unit_price,
            composition,
        }
        .without_empty_lines())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
