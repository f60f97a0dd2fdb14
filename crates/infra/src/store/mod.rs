//! Backing-store abstraction for inventory data.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{DomainError, ProductId};
use stockroom_inventory::{
    NewProduct, NewProductionOrder, NewStockEntry, Product, ProductUpdate, ProductionOrder, StockEntry, Unit,
};

pub mod http;
pub mod in_memory;

pub use http::HttpInventoryStore;
pub use in_memory::{InMemoryInventoryStore, InventoryFixture};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected the request on domain grounds.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Missing, expired or rejected session token.
    #[error("unauthorized")]
    Unauthorized,

    #[error("transport error: {0}")]
    Transport(String),

    /// Unexpected HTTP status from the backend.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(String),

    /// Local file access, e.g. reading a fixture.
    #[error("io error: {0}")]
    Io(String),
}

impl StoreError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StoreError::Unauthorized | StoreError::Domain(DomainError::Unauthorized))
    }
}

/// Source of units, products, stock entries and production orders.
///
/// Reads return the full listing; ledger math happens on the caller's side
/// over a snapshot of these listings.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_units(&self) -> StoreResult<Vec<Unit>>;
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn list_stock_entries(&self) -> StoreResult<Vec<StockEntry>>;
    async fn list_production_orders(&self) -> StoreResult<Vec<ProductionOrder>>;

    async fn create_product(&self, input: NewProduct) -> StoreResult<Product>;
    async fn update_product(&self, id: ProductId, input: ProductUpdate) -> StoreResult<Product>;
    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;
    async fn add_stock(&self, input: NewStockEntry) -> StoreResult<StockEntry>;
    async fn create_production_order(&self, input: NewProductionOrder) -> StoreResult<ProductionOrder>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn list_units(&self) -> StoreResult<Vec<Unit>> {
        (**self).list_units().await
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        (**self).list_products().await
    }

    async fn list_stock_entries(&self) -> StoreResult<Vec<StockEntry>> {
        (**self).list_stock_entries().await
    }

    async fn list_production_orders(&self) -> StoreResult<Vec<ProductionOrder>> {
        (**self).list_production_orders().await
    }

    async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        (**self).create_product(input).await
    }

    async fn update_product(&self, id: ProductId, input: ProductUpdate) -> StoreResult<Product> {
        (**self).update_product(id, input).await
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete_product(id).await
    }

    async fn add_stock(&self, input: NewStockEntry) -> StoreResult<StockEntry> {
        (**self).add_stock(input).await
    }

    async fn create_production_order(&self, input: NewProductionOrder) -> StoreResult<ProductionOrder> {
        (**self).create_production_order(input).await
    }
}
