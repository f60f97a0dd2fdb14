//! Stock ledger derivations.
//!
//! Pure functions over immutable snapshots of stock entries: current balance per
//! product, low-stock classification and the portfolio rollups the dashboard
//! shows. Nothing here performs IO or keeps state, and nothing here fails: an
//! empty collection is a valid zero-stock state.
//!
//! Ordering rule used throughout: the later `entry_date` wins, and among entries
//! with the same date the one later in the slice (created more recently) wins.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;

use crate::order::ProductionOrder;
use crate::product::Product;
use crate::stock::StockEntry;
use crate::threshold::{DEFAULT_LOW_STOCK_THRESHOLD, StockThreshold};

/// Default number of rows in "recent" listings.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Stock status label shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
}

impl StockStatus {
    pub fn classify(balance: i64, threshold: StockThreshold) -> Self {
        if threshold.is_low(balance) {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
        }
    }
}

/// A product whose current balance is below its threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockItem<'a> {
    pub product: &'a Product,
    pub balance: i64,
    pub threshold: i64,
    /// Date of the entry the balance was read from; `None` when the product has no entries.
    pub last_entry_date: Option<NaiveDate>,
}

/// The entry that carries a product's current balance.
pub fn latest_entry(product_id: ProductId, entries: &[StockEntry]) -> Option<&StockEntry> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.product_id == product_id)
        .max_by_key(|(pos, e)| (e.entry_date, *pos))
        .map(|(_, e)| e)
}

/// Current closing balance of a product; 0 when it has no entries.
pub fn current_balance(product_id: ProductId, entries: &[StockEntry]) -> i64 {
    latest_entry(product_id, entries).map_or(0, |e| e.closing_balance)
}

/// `balance < threshold`, with the global default for a missing or non-positive threshold.
pub fn is_low_stock(balance: i64, threshold: Option<i64>) -> bool {
    is_low_stock_with_default(balance, threshold, DEFAULT_LOW_STOCK_THRESHOLD)
}

/// Same as [`is_low_stock`] with a configured default threshold.
pub fn is_low_stock_with_default(balance: i64, threshold: Option<i64>, default: i64) -> bool {
    StockThreshold::resolve(threshold, default).is_low(balance)
}

/// Latest entry per product, in one pass.
pub fn latest_per_product(entries: &[StockEntry]) -> HashMap<ProductId, &StockEntry> {
    let mut latest: HashMap<ProductId, &StockEntry> = HashMap::new();
    for entry in entries {
        latest
            .entry(entry.product_id)
            .and_modify(|cur| {
                // `>=`: a later slot with the same date is the more recent entry.
                if entry.entry_date >= cur.entry_date {
                    *cur = entry;
                }
            })
            .or_insert(entry);
    }
    latest
}

/// Sum of the current balance of every product present in `entries`.
///
/// Historical entries never contribute: only each product's latest one counts.
/// Saturates at the `i64` bounds.
pub fn total_stock(entries: &[StockEntry]) -> i64 {
    latest_per_product(entries)
        .values()
        .fold(0i64, |total, e| total.saturating_add(e.closing_balance))
}

/// Products whose current balance is below their effective threshold.
///
/// Ordered ascending by balance (most urgent first); equal balances keep
/// catalog order.
pub fn low_stock_list<'a>(
    products: &'a [Product],
    entries: &[StockEntry],
    default_threshold: i64,
) -> Vec<LowStockItem<'a>> {
    let latest = latest_per_product(entries);

    let mut items: Vec<LowStockItem<'a>> = products
        .iter()
        .filter_map(|product| {
            let entry = latest.get(&product.id);
            let balance = entry.map_or(0, |e| e.closing_balance);
            let threshold = StockThreshold::resolve(product.stock_threshold, default_threshold);
            threshold.is_low(balance).then(|| LowStockItem {
                product,
                balance,
                threshold: threshold.get(),
                last_entry_date: entry.map(|e| e.entry_date),
            })
        })
        .collect();

    items.sort_by_key(|item| item.balance);
    items
}

/// Most recent stock entries first, at most `limit`.
pub fn recent_entries(entries: &[StockEntry], limit: usize) -> Vec<&StockEntry> {
    most_recent_first(entries, limit, |e| e.entry_date)
}

/// Most recent production orders first, at most `limit`.
pub fn recent_orders(orders: &[ProductionOrder], limit: usize) -> Vec<&ProductionOrder> {
    most_recent_first(orders, limit, |o| o.order_date)
}

fn most_recent_first<T>(items: &[T], limit: usize, date: impl Fn(&T) -> NaiveDate) -> Vec<&T> {
    let mut ordered: Vec<(usize, &T)> = items.iter().enumerate().collect();
    ordered.sort_by(|(pa, a), (pb, b)| date(b).cmp(&date(a)).then(pb.cmp(pa)));
    ordered.into_iter().take(limit).map(|(_, item)| item).collect()
}

/// Borrowed ledger view over one snapshot of products and entries.
#[derive(Debug, Clone, Copy)]
pub struct StockLedger<'a> {
    products: &'a [Product],
    entries: &'a [StockEntry],
    default_threshold: i64,
}

impl<'a> StockLedger<'a> {
    pub fn new(products: &'a [Product], entries: &'a [StockEntry]) -> Self {
        Self {
            products,
            entries,
            default_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn with_default_threshold(mut self, default_threshold: i64) -> Self {
        self.default_threshold = default_threshold;
        self
    }

    pub fn default_threshold(&self) -> i64 {
        self.default_threshold
    }

    pub fn current_balance(&self, product_id: ProductId) -> i64 {
        current_balance(product_id, self.entries)
    }

    pub fn latest_entry(&self, product_id: ProductId) -> Option<&'a StockEntry> {
        latest_entry(product_id, self.entries)
    }

    pub fn threshold_for(&self, product: &Product) -> StockThreshold {
        StockThreshold::resolve(product.stock_threshold, self.default_threshold)
    }

    pub fn status(&self, product: &Product) -> StockStatus {
        StockStatus::classify(self.current_balance(product.id), self.threshold_for(product))
    }

    pub fn total_stock(&self) -> i64 {
        total_stock(self.entries)
    }

    pub fn low_stock(&self) -> Vec<LowStockItem<'a>> {
        low_stock_list(self.products, self.entries, self.default_threshold)
    }

    pub fn recent_entries(&self, limit: usize) -> Vec<&'a StockEntry> {
        recent_entries(self.entries, limit)
    }
}
