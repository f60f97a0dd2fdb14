//! Dashboard widgets derived from one inventory snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{ProductId, ProductionOrderId};

use crate::ledger::{self, StockLedger};
use crate::order::ProductionOrder;
use crate::product::Catalog;
use crate::settings::LedgerSettings;
use crate::stock::StockEntry;

/// Payload behind the dashboard screen (stats cards, alerts, recent activity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_stock: i64,
    pub low_stock_items: Vec<LowStockAlert>,
    pub recent_production_orders: Vec<RecentOrder>,
    pub recent_entries: Vec<StockEntry>,
}

/// Low-stock alert row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub id: ProductId,
    pub name: String,
    pub closing_balance: i64,
    /// "Last updated" date; absent for products that never had stock.
    pub entry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub name: String,
}

/// Recent production order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: ProductionOrderId,
    pub style_name: String,
    pub quantity_used: i64,
    pub product: ProductRef,
    pub order_date: NaiveDate,
}

impl DashboardSummary {
    pub fn build(
        catalog: &Catalog<'_>,
        entries: &[StockEntry],
        orders: &[ProductionOrder],
        settings: &LedgerSettings,
    ) -> Self {
        let ledger = StockLedger::new(catalog.products(), entries)
            .with_default_threshold(settings.default_threshold);

        let low_stock_items = ledger
            .low_stock()
            .into_iter()
            .map(|item| LowStockAlert {
                id: item.product.id,
                name: item.product.name.clone(),
                closing_balance: item.balance,
                entry_date: item.last_entry_date,
            })
            .collect();

        let recent_production_orders = ledger::recent_orders(orders, settings.recent_limit)
            .into_iter()
            .map(|order| RecentOrder {
                id: order.id,
                style_name: order.style_name.clone(),
                quantity_used: order.quantity_used,
                product: ProductRef {
                    name: catalog.product_name(order.product_id).to_string(),
                },
                order_date: order.order_date,
            })
            .collect();

        Self {
            total_products: catalog.products().len(),
            total_stock: ledger.total_stock(),
            low_stock_items,
            recent_production_orders,
            recent_entries: ledger
                .recent_entries(settings.recent_limit)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
