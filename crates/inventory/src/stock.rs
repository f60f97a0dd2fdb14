use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, StockEntryId};

use crate::date::iso_date;

/// One dated line of a product's stock ledger.
///
/// Entries are append-only: a new entry records the pieces added on its date
/// and the balance available afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: StockEntryId,
    pub product_id: ProductId,
    #[serde(with = "iso_date")]
    pub entry_date: NaiveDate,
    pub opening_quantity: i64,
    pub closing_balance: i64,
}

impl Entity for StockEntry {
    type Id = StockEntryId;

    fn id(&self) -> StockEntryId {
        self.id
    }
}

/// Input for the "add stock" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockEntry {
    pub product_id: ProductId,
    #[serde(with = "iso_date")]
    pub entry_date: NaiveDate,
    pub opening_quantity: i64,
}

impl NewStockEntry {
    pub fn validate(&self) -> DomainResult<()> {
        if self.opening_quantity <= 0 {
            return Err(DomainError::validation("opening quantity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_timestamp_entry_dates() {
        let e: StockEntry = serde_json::from_str(
            r#"{"id":1,"product_id":2,"entry_date":"2024-03-05T00:00:00.000Z","opening_quantity":10,"closing_balance":60}"#,
        )
        .unwrap();
        assert_eq!(e.entry_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["entry_date"], "2024-03-05");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let input = NewStockEntry {
            product_id: ProductId::new(1),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            opening_quantity: 0,
        };
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));
    }
}
