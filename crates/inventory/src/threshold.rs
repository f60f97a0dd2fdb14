//! Low-stock threshold rule.

use serde::Serialize;

use stockroom_core::ValueObject;

/// Global low-stock threshold, in pieces.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 100;

/// Resolved threshold a balance is compared against.
///
/// A product threshold only counts when it is a positive number; absent, zero
/// and negative values fall back to the default. A non-positive default itself
/// falls back to [`DEFAULT_LOW_STOCK_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StockThreshold(i64);

impl ValueObject for StockThreshold {}

impl StockThreshold {
    pub fn resolve(configured: Option<i64>, default: i64) -> Self {
        match configured {
            Some(t) if t > 0 => Self(t),
            _ if default > 0 => Self(default),
            _ => Self(DEFAULT_LOW_STOCK_THRESHOLD),
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Strictly below the threshold is low; equal is not.
    pub fn is_low(self, balance: i64) -> bool {
        balance < self.0
    }
}

impl Default for StockThreshold {
    fn default() -> Self {
        Self(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// Threshold actually applied for a configured value and a default.
pub fn effective_threshold(threshold: Option<i64>, default: i64) -> i64 {
    StockThreshold::resolve(threshold, default).get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_threshold_wins() {
        assert_eq!(effective_threshold(Some(25), 100), 25);
    }

    #[test]
    fn missing_zero_and_negative_fall_back_to_default() {
        assert_eq!(effective_threshold(None, 100), 100);
        assert_eq!(effective_threshold(Some(0), 100), 100);
        assert_eq!(effective_threshold(Some(-5), 40), 40);
    }

    #[test]
    fn non_positive_default_falls_back_to_global() {
        assert_eq!(effective_threshold(None, 0), DEFAULT_LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn equal_balance_is_not_low() {
        let t = StockThreshold::resolve(Some(100), 100);
        assert!(t.is_low(99));
        assert!(!t.is_low(100));
    }
}
