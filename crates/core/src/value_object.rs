//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances with the same attributes are
/// the same value. They are immutable once built: "changing" one means
/// constructing a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct StockThreshold(i64);
///
/// impl ValueObject for StockThreshold {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
