//! Snapshot of the backend's listings and the service that keeps it fresh.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::ProductId;
use stockroom_inventory::{
    Catalog, DashboardSummary, LedgerSettings, NewProduct, NewProductionOrder, NewStockEntry, OrderReportFilter,
    OrderReportRow, Product, ProductUpdate, ProductionOrder, ReportRange, StockEntry, StockLedger, StockReportFilter,
    StockReportRow, Unit, orders_report, stock_report,
};

use crate::store::{InventoryStore, StoreResult};

/// Everything the ledger needs, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventorySnapshot {
    pub units: Vec<Unit>,
    pub products: Vec<Product>,
    pub stock_entries: Vec<StockEntry>,
    pub production_orders: Vec<ProductionOrder>,
    /// `None` for the empty snapshot.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl InventorySnapshot {
    /// Fetch the four listings concurrently.
    pub async fn load<S: InventoryStore + ?Sized>(store: &S) -> StoreResult<Self> {
        let (units, products, stock_entries, production_orders) = tokio::try_join!(
            store.list_units(),
            store.list_products(),
            store.list_stock_entries(),
            store.list_production_orders(),
        )?;

        Ok(Self {
            units,
            products,
            stock_entries,
            production_orders,
            fetched_at: Some(Utc::now()),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.fetched_at.is_none()
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.products, &self.units)
    }

    pub fn ledger(&self, settings: &LedgerSettings) -> StockLedger<'_> {
        StockLedger::new(&self.products, &self.stock_entries).with_default_threshold(settings.default_threshold)
    }

    pub fn dashboard(&self, settings: &LedgerSettings) -> DashboardSummary {
        DashboardSummary::build(&self.catalog(), &self.stock_entries, &self.production_orders, settings)
    }

    pub fn stock_report(
        &self,
        range: ReportRange,
        filter: &StockReportFilter,
        settings: &LedgerSettings,
    ) -> Vec<StockReportRow> {
        stock_report(&self.catalog(), &self.stock_entries, range, filter, settings.default_threshold)
    }

    pub fn orders_report(&self, range: ReportRange, filter: &OrderReportFilter) -> Vec<OrderReportRow> {
        orders_report(&self.catalog(), &self.production_orders, range, filter)
    }
}

/// Holds the current snapshot of one store and re-fetches it after every write.
///
/// Readers get an `Arc` to an immutable snapshot; a refresh swaps in a new one.
pub struct InventoryService<S> {
    store: S,
    settings: LedgerSettings,
    snapshot: RwLock<Arc<InventorySnapshot>>,
}

impl<S: InventoryStore> InventoryService<S> {
    /// Starts with the empty snapshot; call [`Self::refresh`] to load.
    pub fn new(store: S, settings: LedgerSettings) -> Self {
        Self {
            store,
            settings,
            snapshot: RwLock::new(Arc::new(InventorySnapshot::default())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> Arc<InventorySnapshot> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn replace(&self, next: InventorySnapshot) {
        let next = Arc::new(next);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Re-fetch everything.
    ///
    /// On failure the snapshot is cleared (zero balances, empty lists) and the
    /// error is returned.
    pub async fn refresh(&self) -> StoreResult<Arc<InventorySnapshot>> {
        match InventorySnapshot::load(&self.store).await {
            Ok(snapshot) => {
                tracing::info!(
                    products = snapshot.products.len(),
                    stock_entries = snapshot.stock_entries.len(),
                    production_orders = snapshot.production_orders.len(),
                    "inventory snapshot refreshed"
                );
                self.replace(snapshot);
                Ok(self.snapshot())
            }
            Err(err) => {
                tracing::warn!(error = %err, "inventory refresh failed; clearing snapshot");
                self.replace(InventorySnapshot::default());
                Err(err)
            }
        }
    }

    /// A committed write stands even when the follow-up fetch fails; that
    /// failure is logged by [`Self::refresh`] and leaves the snapshot empty.
    async fn refresh_after_write(&self) {
        if self.refresh().await.is_err() {
            tracing::debug!("write committed but snapshot could not be refreshed");
        }
    }

    pub fn dashboard(&self) -> DashboardSummary {
        self.snapshot().dashboard(&self.settings)
    }

    pub fn current_balance(&self, product_id: ProductId) -> i64 {
        self.snapshot().ledger(&self.settings).current_balance(product_id)
    }

    pub fn stock_report(&self, range: ReportRange, filter: &StockReportFilter) -> Vec<StockReportRow> {
        self.snapshot().stock_report(range, filter, &self.settings)
    }

    pub fn orders_report(&self, range: ReportRange, filter: &OrderReportFilter) -> Vec<OrderReportRow> {
        self.snapshot().orders_report(range, filter)
    }

    pub async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        let product = self.store.create_product(input).await?;
        self.refresh_after_write().await;
        Ok(product)
    }

    pub async fn update_product(&self, id: ProductId, input: ProductUpdate) -> StoreResult<Product> {
        let product = self.store.update_product(id, input).await?;
        self.refresh_after_write().await;
        Ok(product)
    }

    pub async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        self.store.delete_product(id).await?;
        self.refresh_after_write().await;
        Ok(())
    }

    pub async fn add_stock(&self, input: NewStockEntry) -> StoreResult<StockEntry> {
        let entry = self.store.add_stock(input).await?;
        self.refresh_after_write().await;
        Ok(entry)
    }

    pub async fn create_production_order(&self, input: NewProductionOrder) -> StoreResult<ProductionOrder> {
        let order = self.store.create_production_order(input).await?;
        self.refresh_after_write().await;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use stockroom_core::UnitId;

    use crate::store::{InMemoryInventoryStore, StoreError};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.into(),
            unit_id: UnitId::new(1),
            remarks: String::new(),
            stock_threshold: None,
        }
    }

    /// Wraps the in-memory store and fails reads on demand.
    struct FlakyStore {
        inner: InMemoryInventoryStore,
        fail_reads: AtomicBool,
    }

    impl FlakyStore {
        fn check(&self) -> StoreResult<()> {
            if self.fail_reads.load(Ordering::SeqCst) {
                Err(StoreError::Transport("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl InventoryStore for FlakyStore {
        async fn list_units(&self) -> StoreResult<Vec<Unit>> {
            self.check()?;
            self.inner.list_units().await
        }
        async fn list_products(&self) -> StoreResult<Vec<Product>> {
            self.check()?;
            self.inner.list_products().await
        }
        async fn list_stock_entries(&self) -> StoreResult<Vec<StockEntry>> {
            self.check()?;
            self.inner.list_stock_entries().await
        }
        async fn list_production_orders(&self) -> StoreResult<Vec<ProductionOrder>> {
            self.check()?;
            self.inner.list_production_orders().await
        }
        async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
            self.inner.create_product(input).await
        }
        async fn update_product(&self, id: ProductId, input: ProductUpdate) -> StoreResult<Product> {
            self.inner.update_product(id, input).await
        }
        async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
            self.inner.delete_product(id).await
        }
        async fn add_stock(&self, input: NewStockEntry) -> StoreResult<StockEntry> {
            self.inner.add_stock(input).await
        }
        async fn create_production_order(&self, input: NewProductionOrder) -> StoreResult<ProductionOrder> {
            self.inner.create_production_order(input).await
        }
    }

    #[tokio::test]
    async fn writes_refresh_the_snapshot() {
        let service = InventoryService::new(InMemoryInventoryStore::new(), LedgerSettings::default());
        assert!(service.snapshot().is_empty());

        let product = service.create_product(new_product("Denim")).await.unwrap();
        assert_eq!(service.snapshot().products.len(), 1);

        service
            .add_stock(NewStockEntry {
                product_id: product.id,
                entry_date: date(1, 1),
                opening_quantity: 150,
            })
            .await
            .unwrap();
        assert_eq!(service.current_balance(product.id), 150);
        assert!(service.dashboard().low_stock_items.is_empty());

        let entry_id = service.snapshot().stock_entries[0].id;
        service
            .create_production_order(NewProductionOrder {
                style_name: "Jacket".into(),
                order_date: date(1, 3),
                product_id: product.id,
                stock_entry_id: entry_id,
                quantity_used: 60,
                notes: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(service.current_balance(product.id), 90);
        let dashboard = service.dashboard();
        assert_eq!(dashboard.total_stock, 90);
        assert_eq!(dashboard.low_stock_items.len(), 1);
        assert_eq!(dashboard.recent_production_orders[0].product.name, "Denim");
    }

    #[tokio::test]
    async fn failed_refresh_clears_the_snapshot() {
        let store = FlakyStore {
            inner: InMemoryInventoryStore::new(),
            fail_reads: AtomicBool::new(false),
        };
        let service = InventoryService::new(store, LedgerSettings::default());
        let product = service.create_product(new_product("Lace")).await.unwrap();
        service
            .add_stock(NewStockEntry {
                product_id: product.id,
                entry_date: date(2, 1),
                opening_quantity: 10,
            })
            .await
            .unwrap();
        assert_eq!(service.current_balance(product.id), 10);

        service.store().fail_reads.store(true, Ordering::SeqCst);
        let err = service.refresh().await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));

        let snapshot = service.snapshot();
        assert!(snapshot.is_empty());
        assert!(snapshot.products.is_empty());
        assert_eq!(service.current_balance(product.id), 0);
        assert_eq!(service.dashboard().total_stock, 0);
    }

    #[tokio::test]
    async fn committed_write_succeeds_even_if_refresh_fails() {
        let store = FlakyStore {
            inner: InMemoryInventoryStore::new(),
            fail_reads: AtomicBool::new(true),
        };
        let service = InventoryService::new(store, LedgerSettings::default());

        let product = service.create_product(new_product("Tweed")).await.unwrap();
        assert_eq!(product.name, "Tweed");
        assert!(service.snapshot().is_empty());
        assert_eq!(service.store().inner.list_products().await.unwrap().len(), 1);

        service.store().fail_reads.store(false, Ordering::SeqCst);
        service.refresh().await.unwrap();
        assert_eq!(service.snapshot().products, vec![product]);
    }

    #[tokio::test]
    async fn failed_write_leaves_snapshot_untouched() {
        let service = InventoryService::new(InMemoryInventoryStore::new(), LedgerSettings::default());
        service.create_product(new_product("Silk")).await.unwrap();
        let before = service.snapshot();

        let err = service.delete_product(ProductId::new(404)).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(_)));
        assert!(Arc::ptr_eq(&before, &service.snapshot()));
    }

    #[tokio::test]
    async fn reports_cover_the_requested_range() {
        let service = InventoryService::new(InMemoryInventoryStore::new(), LedgerSettings::default());
        let product = service.create_product(new_product("Velvet")).await.unwrap();
        for (m, qty) in [(1, 10), (2, 20), (3, 30)] {
            service
                .add_stock(NewStockEntry {
                    product_id: product.id,
                    entry_date: date(m, 10),
                    opening_quantity: qty,
                })
                .await
                .unwrap();
        }

        let range = ReportRange::new(date(2, 1), date(3, 31)).unwrap();
        let rows = service.stock_report(range, &StockReportFilter::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entry_date, date(3, 10));
        assert_eq!(rows[0].closing_balance, 60);
        assert!(service.orders_report(range, &OrderReportFilter::default()).is_empty());
    }
}
