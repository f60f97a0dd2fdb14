//! `stockroom-infra` — storage backends, snapshot service and configuration.
//!
//! Domain rules live in `stockroom-inventory`; this crate moves data between
//! them and a backend (in-memory or remote HTTP) and keeps the current
//! snapshot fresh.

pub mod config;
pub mod service;
pub mod store;

pub use self::config::{AuthSettings, BackendSettings, ServerSettings, Settings};
pub use service::{InventoryService, InventorySnapshot};
pub use store::{
    HttpInventoryStore, InMemoryInventoryStore, InventoryFixture, InventoryStore, StoreError, StoreResult,
};
