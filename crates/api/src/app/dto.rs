use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;
use stockroom_inventory::date::parse_iso_date;
use stockroom_inventory::{OrderReportFilter, ReportRange, StatusFilter, StockReportFilter};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Query of `GET /api/reports/stock`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
}

impl StockReportQuery {
    pub fn filter(&self) -> StockReportFilter {
        StockReportFilter {
            search: self.search.clone(),
            status: self.status,
        }
    }
}

/// Query of `GET /api/reports/orders`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub search: String,
}

impl OrderReportQuery {
    pub fn filter(&self) -> OrderReportFilter {
        OrderReportFilter {
            search: self.search.clone(),
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ReportResponse<T> {
    pub data: Vec<T>,
}

// -------------------------
// Mapping helpers
// -------------------------

pub fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

/// Missing bounds fall back to the previous calendar month.
pub fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<ReportRange, axum::response::Response> {
    let fallback = ReportRange::last_month(today);
    let start = parse_bound("startDate", start)?.unwrap_or(fallback.start());
    let end = parse_bound("endDate", end)?.unwrap_or(fallback.end());
    ReportRange::new(start, end).map_err(errors::domain_error_to_response)
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, axum::response::Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_iso_date(s).map(Some).ok_or_else(|| {
            errors::json_error(
                axum::http::StatusCode::BAD_REQUEST,
                "invalid_date",
                format!("{name} must be a YYYY-MM-DD date"),
            )
        }),
    }
}
