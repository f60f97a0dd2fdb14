use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, ProductionOrderId, StockEntryId};

use crate::date::{iso_date, nullable_string};

/// Production order: allocates stock of one product to a named style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub id: ProductionOrderId,
    pub style_name: String,
    #[serde(with = "iso_date")]
    pub order_date: NaiveDate,
    pub product_id: ProductId,
    pub stock_entry_id: StockEntryId,
    pub quantity_used: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub notes: String,
}

impl Entity for ProductionOrder {
    type Id = ProductionOrderId;

    fn id(&self) -> ProductionOrderId {
        self.id
    }
}

/// Input for the "create order" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductionOrder {
    pub style_name: String,
    #[serde(with = "iso_date")]
    pub order_date: NaiveDate,
    pub product_id: ProductId,
    pub stock_entry_id: StockEntryId,
    pub quantity_used: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub notes: String,
}

impl NewProductionOrder {
    pub fn validate(&self) -> DomainResult<()> {
        if self.style_name.trim().is_empty() {
            return Err(DomainError::validation("style name cannot be empty"));
        }
        if self.quantity_used <= 0 {
            return Err(DomainError::validation("quantity used must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(style: &str, qty: i64) -> NewProductionOrder {
        NewProductionOrder {
            style_name: style.to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            product_id: ProductId::new(1),
            stock_entry_id: StockEntryId::new(1),
            quantity_used: qty,
            notes: String::new(),
        }
    }

    #[test]
    fn accepts_well_formed_order() {
        assert!(input("JAMANA BLACK", 12).validate().is_ok());
    }

    #[test]
    fn rejects_blank_style_and_non_positive_quantity() {
        assert!(matches!(input("  ", 12).validate(), Err(DomainError::Validation(_))));
        assert!(matches!(input("JAMANA BLACK", 0).validate(), Err(DomainError::Validation(_))));
        assert!(matches!(input("JAMANA BLACK", -3).validate(), Err(DomainError::Validation(_))));
    }
}
