// ── API-to-domain type conversions ──
//
// Bridges `artesano_api::types` wire structs and the canonical
// `artesano_core::model` types, in both directions.

use artesano_api::types;

use crate::command::{FeedstockRequest, ProductRequest};
use crate::model::{CompositionLine, EntityId, Feedstock, Page, Product, ProductUsage};

// ── Responses → domain ─────────────────────────────────────────────

impl From<types::FeedstockProductItem> for ProductUsage {
    fn from(p: types::FeedstockProductItem) -> Self {
        Self {
            product_id: EntityId::new(p.id),
            product_code: p.product_code,
            name: p.name,
            unit_price: p.unit_price,
            quantity: p.quantity,
        }
    }
}

impl From<types::FeedstockResponse> for Feedstock {
    fn from(f: types::FeedstockResponse) -> Self {
        Self {
            id: EntityId::new(f.id),
            code: f.feedstock_code,
            name: f.name,
            stock: f.stock,
            unit_of_measure: f.unit_of_measure,
            products: f.products.into_iter().map(ProductUsage::from).collect(),
        }
    }
}

impl From<types::ProductFeedstockItem> for CompositionLine {
    fn from(line: types::ProductFeedstockItem) -> Self {
        Self {
            feedstock_id: EntityId::new(line.id),
            feedstock_code: line.feedstock_code,
            name: line.name,
            stock: line.stock,
            quantity: line.quantity,
        }
    }
}

impl From<types::ProductResponse> for Product {
    fn from(p: types::ProductResponse) -> Self {
        Self {
            id: EntityId::new(p.id),
            code: p.product_code,
            name: p.name,
            unit_price: p.unit_price,
            composition: p.feedstocks.into_iter().map(CompositionLine::from).collect(),
        }
    }
}

/// Map a wire page into a domain page.
pub(crate) fn page_from<S, D: From<S>>(page: types::Page<S>) -> Page<D> {
    Page {
        items: page.items.into_iter().map(D::from).collect(),
        total: page.total,
        page: page.page,
        size: page.size,
    }
}

// ── Requests → wire bodies ─────────────────────────────────────────

impl From<&FeedstockRequest> for types::FeedstockCreateUpdate {
    fn from(req: &FeedstockRequest) -> Self {
        Self {
            feedstock_code: req.code.clone(),
            name: req.name.clone(),
            stock: req.stock,
            unit_of_measure: req.unit_of_measure.as_str().to_owned(),
        }
    }
}

impl From<&ProductRequest> for types::ProductCreateUpdate {
    /// Composition lines that name no feedstock or consume nothing are
    /// filtered out here, so no ineffective line ever reaches the backend.
    fn from(req: &ProductRequest) -> Self {
        Self {
            product_code: req.code.clone(),
            name: req.name.clone(),
            unit_price: req.unit_price,
            feedstocks: req
                .composition
                .iter()
                .filter(|line| line.is_effective())
                .map(|line| types::FeedstockQuantity {
                    feedstock_id: line.feedstock_id.get(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CompositionInput;
    use crate::model::UnitOfMeasure;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn product_body_drops_ineffective_lines() {
        let req = ProductRequest {
            code: "MESA-01".into(),
            name: "Mesa".into(),
            unit_price: Decimal::from(100),
            composition: vec![
                CompositionInput {
                    feedstock_id: EntityId::new(1),
                    quantity: Decimal::from(2),
                },
                CompositionInput {
                    feedstock_id: EntityId::new(0),
                    quantity: Decimal::from(5),
                },
                CompositionInput {
                    feedstock_id: EntityId::new(2),
                    quantity: Decimal::ZERO,
                },
                CompositionInput {
                    feedstock_id: EntityId::new(3),
                    quantity: Decimal::from(-1),
                },
            ],
        };
        let body = types::ProductCreateUpdate::from(&req);
        assert_eq!(
            body.feedstocks,
            vec![types::FeedstockQuantity {
                feedstock_id: 1,
                quantity: Decimal::from(2),
            }]
        );
    }

    #[test]
    fn feedstock_body_uses_unit_tag() {
        let req = FeedstockRequest {
            code: "F-123".into(),
            name: "Carvalho".into(),
            stock: Decimal::new(125, 1),
            unit_of_measure: UnitOfMeasure::Kg,
        };
        let body = types::FeedstockCreateUpdate::from(&req);
        assert_eq!(body.unit_of_measure, "KG");
        assert_eq!(body.feedstock_code, "F-123");
    }

    #[test]
    fn response_maps_back_references() {
        let resp = types::FeedstockResponse {
            id: 4,
            feedstock_code: "MDF-18".into(),
            name: "MDF 18mm".into(),
            stock: Decimal::from(20),
            unit_of_measure: "M2".into(),
            products: vec![types::FeedstockProductItem {
                id: 9,
                product_code: "ARM-01".into(),
                name: "Armário".into(),
                unit_price: Decimal::from(800),
                quantity: Decimal::from(3),
            }],
        };
        let feedstock = Feedstock::from(resp);
        assert_eq!(feedstock.dependent_count(), 1);
        assert_eq!(feedstock.products[0].product_id, EntityId::new(9));
        assert_eq!(feedstock.unit(), Some(UnitOfMeasure::M2));
    }
}
