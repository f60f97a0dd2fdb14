//! Stock and production-order reports over a date range.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ProductionOrderId, StockEntryId};

use crate::ledger::StockStatus;
use crate::order::ProductionOrder;
use crate::product::Catalog;
use crate::stock::StockEntry;
use crate::threshold::StockThreshold;

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation("report start date is after end date"));
        }
        Ok(Self { start, end })
    }

    /// First to last day of the calendar month before `today`.
    pub fn last_month(today: NaiveDate) -> Self {
        let first_of_this_month = today - Duration::days(i64::from(today.day0()));
        let end = first_of_this_month - Duration::days(1);
        let start = end - Duration::days(i64::from(end.day0()));
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Status facet of the stock report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    InStock,
    LowStock,
}

impl StatusFilter {
    fn matches(self, status: StockStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::InStock => status == StockStatus::InStock,
            StatusFilter::LowStock => status == StockStatus::LowStock,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockReportFilter {
    /// Case-insensitive product-name substring.
    pub search: String,
    pub status: StatusFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderReportFilter {
    /// Case-insensitive substring of style or product name.
    pub search: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReportRow {
    pub id: StockEntryId,
    pub product_name: String,
    pub unit: String,
    pub entry_date: NaiveDate,
    pub opening_quantity: i64,
    pub closing_balance: i64,
    pub status: StockStatus,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReportRow {
    pub id: ProductionOrderId,
    pub style_name: String,
    pub product_name: String,
    pub unit: String,
    pub order_date: NaiveDate,
    pub quantity_used: i64,
    pub stock_entry_id: StockEntryId,
    pub notes: String,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Stock entries dated within `range`, newest first.
///
/// Each row's status compares that entry's closing balance with the product's
/// effective threshold.
pub fn stock_report(
    catalog: &Catalog<'_>,
    entries: &[StockEntry],
    range: ReportRange,
    filter: &StockReportFilter,
    default_threshold: i64,
) -> Vec<StockReportRow> {
    let search = filter.search.trim();

    let mut rows: Vec<(usize, StockReportRow)> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| range.contains(e.entry_date))
        .filter_map(|(pos, e)| {
            let product = catalog.product(e.product_id);
            let threshold = StockThreshold::resolve(product.and_then(|p| p.stock_threshold), default_threshold);
            let row = StockReportRow {
                id: e.id,
                product_name: catalog.product_name(e.product_id).to_string(),
                unit: catalog.unit_name_for(e.product_id).to_string(),
                entry_date: e.entry_date,
                opening_quantity: e.opening_quantity,
                closing_balance: e.closing_balance,
                status: StockStatus::classify(e.closing_balance, threshold),
                remarks: product.map(|p| p.remarks.clone()).unwrap_or_default(),
            };
            (contains_ignore_case(&row.product_name, search) && filter.status.matches(row.status))
                .then_some((pos, row))
        })
        .collect();

    rows.sort_by(|(pa, a), (pb, b)| b.entry_date.cmp(&a.entry_date).then(pb.cmp(pa)));
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Production orders dated within `range`, newest first.
pub fn orders_report(
    catalog: &Catalog<'_>,
    orders: &[ProductionOrder],
    range: ReportRange,
    filter: &OrderReportFilter,
) -> Vec<OrderReportRow> {
    let search = filter.search.trim();

    let mut rows: Vec<(usize, OrderReportRow)> = orders
        .iter()
        .enumerate()
        .filter(|(_, o)| range.contains(o.order_date))
        .map(|(pos, o)| {
            (
                pos,
                OrderReportRow {
                    id: o.id,
                    style_name: o.style_name.clone(),
                    product_name: catalog.product_name(o.product_id).to_string(),
                    unit: catalog.unit_name_for(o.product_id).to_string(),
                    order_date: o.order_date,
                    quantity_used: o.quantity_used,
                    stock_entry_id: o.stock_entry_id,
                    notes: o.notes.clone(),
                },
            )
        })
        .filter(|(_, row)| {
            contains_ignore_case(&row.style_name, search) || contains_ignore_case(&row.product_name, search)
        })
        .collect();

    rows.sort_by(|(pa, a), (pb, b)| b.order_date.cmp(&a.order_date).then(pb.cmp(pa)));
    rows.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Product, Unit, UNKNOWN_PRODUCT};
    use stockroom_core::{ProductId, UnitId};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn fixtures() -> (Vec<Product>, Vec<Unit>, Vec<StockEntry>, Vec<ProductionOrder>) {
        let products = vec![
            Product {
                id: ProductId::new(1),
                name: "Black Denim".to_string(),
                unit_id: UnitId::new(1),
                remarks: "roll stock".to_string(),
                stock_threshold: Some(50),
            },
            Product {
                id: ProductId::new(2),
                name: "White Lining".to_string(),
                unit_id: UnitId::new(2),
                remarks: String::new(),
                stock_threshold: None,
            },
        ];
        let units = vec![Unit { id: UnitId::new(1), name: "meters".to_string() }];
        let entry = |id: i64, product: i64, on: NaiveDate, balance: i64| StockEntry {
            id: StockEntryId::new(id),
            product_id: ProductId::new(product),
            entry_date: on,
            opening_quantity: 10,
            closing_balance: balance,
        };
        let entries = vec![
            entry(1, 1, date(1, 31), 40),
            entry(2, 2, date(2, 10), 400),
            entry(3, 1, date(2, 20), 120),
            entry(4, 2, date(3, 1), 90),
        ];
        let order = |id: i64, product: i64, style: &str, on: NaiveDate| ProductionOrder {
            id: ProductionOrderId::new(id),
            style_name: style.to_string(),
            order_date: on,
            product_id: ProductId::new(product),
            stock_entry_id: StockEntryId::new(1),
            quantity_used: 3,
            notes: String::new(),
        };
        let orders = vec![
            order(1, 1, "JAMANA BLACK", date(2, 5)),
            order(2, 2, "Summer Kurta", date(2, 25)),
            order(3, 7, "Orphan", date(2, 26)),
        ];
        (products, units, entries, orders)
    }

    #[test]
    fn last_month_spans_previous_calendar_month() {
        let r = ReportRange::last_month(date(3, 15));
        assert_eq!(r.start(), date(2, 1));
        assert_eq!(r.end(), date(2, 29));

        let jan = ReportRange::last_month(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(jan.start(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(jan.end(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(ReportRange::new(date(2, 2), date(2, 1)), Err(DomainError::Validation(_))));
    }

    #[test]
    fn stock_report_is_range_bounded_and_newest_first() {
        let (products, units, entries, _) = fixtures();
        let catalog = Catalog::new(&products, &units);
        let range = ReportRange::new(date(2, 1), date(2, 29)).unwrap();

        let rows = stock_report(&catalog, &entries, range, &StockReportFilter::default(), 100);
        let ids: Vec<i64> = rows.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(rows[0].unit, "meters");
        assert_eq!(rows[0].remarks, "roll stock");
        assert_eq!(rows[0].status, StockStatus::InStock);
        assert_eq!(rows[1].unit, "pcs");
    }

    #[test]
    fn stock_report_filters_by_name_and_status() {
        let (products, units, entries, _) = fixtures();
        let catalog = Catalog::new(&products, &units);
        let range = ReportRange::new(date(1, 1), date(3, 31)).unwrap();

        let low = StockReportFilter { search: String::new(), status: StatusFilter::LowStock };
        let rows = stock_report(&catalog, &entries, range, &low, 100);
        let ids: Vec<i64> = rows.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![4, 1]);

        let denim = StockReportFilter { search: "DENIM".to_string(), status: StatusFilter::All };
        let rows = stock_report(&catalog, &entries, range, &denim, 100);
        assert!(rows.iter().all(|r| r.product_name == "Black Denim"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn orders_report_matches_style_or_product_and_degrades_unknown_products() {
        let (products, units, _, orders) = fixtures();
        let catalog = Catalog::new(&products, &units);
        let range = ReportRange::new(date(2, 1), date(2, 29)).unwrap();

        let all = orders_report(&catalog, &orders, range, &OrderReportFilter::default());
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].product_name, UNKNOWN_PRODUCT);

        let lining = OrderReportFilter { search: "lining".to_string() };
        let rows = orders_report(&catalog, &orders, range, &lining);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].style_name, "Summer Kurta");

        let style = OrderReportFilter { search: "jamana".to_string() };
        assert_eq!(orders_report(&catalog, &orders, range, &style).len(), 1);
    }
}
