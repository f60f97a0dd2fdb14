//! Calendar-date wire format.
//!
//! Backends send either a plain ISO date (`2024-01-31`) or a full timestamp
//! (`2024-01-31T00:00:00.000Z`). Both decode to the calendar date as written;
//! dates are always encoded back as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an ISO date or timestamp into a calendar date.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// `#[serde(with = "iso_date")]` for `NaiveDate` fields.
pub(crate) mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid ISO date: {raw}")))
    }
}

/// Treat a JSON `null` string as empty.
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
