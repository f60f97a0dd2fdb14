//! Inventory domain module.
//!
//! Business rules for the stock ledger, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage): catalog entities, the low-stock
//! threshold rule, ledger derivations, dashboard rollups and reports.

pub mod dashboard;
pub mod date;
pub mod ledger;
pub mod order;
pub mod product;
pub mod report;
pub mod settings;
pub mod stock;
pub mod threshold;

pub use dashboard::{DashboardSummary, LowStockAlert, ProductRef, RecentOrder};
pub use ledger::{
    LowStockItem, StockLedger, StockStatus, current_balance, is_low_stock, is_low_stock_with_default,
    latest_entry, low_stock_list, recent_entries, recent_orders, total_stock,
};
pub use order::{NewProductionOrder, ProductionOrder};
pub use product::{Catalog, FALLBACK_UNIT, NewProduct, Product, ProductUpdate, UNKNOWN_PRODUCT, Unit};
pub use report::{
    OrderReportFilter, OrderReportRow, ReportRange, StatusFilter, StockReportFilter, StockReportRow,
    orders_report, stock_report,
};
pub use settings::LedgerSettings;
pub use stock::{NewStockEntry, StockEntry};
pub use threshold::{DEFAULT_LOW_STOCK_THRESHOLD, StockThreshold, effective_threshold};
