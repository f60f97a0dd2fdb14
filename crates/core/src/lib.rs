//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, find_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{EmployeeId, ProductId, ProductionOrderId, StockEntryId, UnitId};
pub use value_object::ValueObject;
