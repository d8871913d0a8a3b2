// ── Delete safety lock ──
//
// A feedstock referenced by any product's composition cannot be deleted.
// The check runs on cached back-references, before any request.

use crate::error::CoreError;
use crate::model::Feedstock;

/// Shown when a delete request fails for reasons other than the lock.
pub const DELETE_FAILED_MESSAGE: &str = "Technical error while deleting the record";

/// Refuse deletion of a feedstock that products still consume.
pub fn check_feedstock_deletable(feedstock: &Feedstock) -> Result<(), CoreError> {
    if feedstock.is_in_use() {
        return Err(CoreError::FeedstockInUse {
            name: feedstock.name.clone(),
            dependents: feedstock.dependent_count(),
        });
    }
    Ok(())
}

/// Confirmation question for deleting a named record.
pub fn confirm_prompt(name: &str) -> String {
    format!("Really delete \"{name}\"?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, ProductUsage};
    use rust_decimal::Decimal;

    fn feedstock(products: Vec<ProductUsage>) -> Feedstock {
        Feedstock {
            id: EntityId::new(1),
            code: "CARV-01".into(),
            name: "Carvalho".into(),
            stock: Decimal::from(10),
            unit_of_measure: "M3".into(),
            products,
        }
    }

    fn usage(id: i64) -> ProductUsage {
        ProductUsage {
            product_id: EntityId::new(id),
            product_code: format!("P-{id}"),
            name: format!("Product {id}"),
            unit_price: Decimal::from(100),
            quantity: Decimal::ONE,
        }
    }

    #[test]
    fn unused_feedstock_is_deletable() {
        assert!(check_feedstock_deletable(&feedstock(vec![])).is_ok());
    }

    #[test]
    fn used_feedstock_is_locked_with_count() {
        let err = check_feedstock_deletable(&feedstock(vec![usage(1), usage(2)]));
        match err {
            Err(CoreError::FeedstockInUse { name, dependents }) => {
                assert_eq!(name, "Carvalho");
                assert_eq!(dependents, 2);
            }
            other => panic!("expected FeedstockInUse, got {other:?}"),
        }
    }

    #[test]
    fn prompt_quotes_the_name() {
        assert_eq!(confirm_prompt("Mesa"), "Really delete \"Mesa\"?");
    }
}
