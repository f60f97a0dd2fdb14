use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, ProductId, ProductionOrderId, StockEntryId, UnitId};
use stockroom_inventory::{
    NewProduct, NewProductionOrder, NewStockEntry, Product, ProductUpdate, ProductionOrder, StockEntry, Unit,
    current_balance, latest_entry,
};

use super::{InventoryStore, StoreError, StoreResult};

/// Serialized inventory dataset (the shape of a `data.json` export).
///
/// Unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryFixture {
    pub units: Vec<Unit>,
    pub products: Vec<Product>,
    pub stock_entries: Vec<StockEntry>,
    pub production_orders: Vec<ProductionOrder>,
}

impl InventoryFixture {
    pub fn from_json(raw: &str) -> StoreResult<Self> {
        serde_json::from_str(raw).map_err(|e| StoreError::Decode(format!("inventory fixture: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Units every fresh store starts with.
    pub fn standard_units() -> Vec<Unit> {
        ["pcs", "meters", "kg", "rolls"]
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Unit {
                id: UnitId::new(id),
                name: name.to_string(),
            })
            .collect()
    }
}

#[derive(Debug)]
struct State {
    data: InventoryFixture,
    next_product: i64,
    next_entry: i64,
    next_order: i64,
}

impl State {
    fn new(data: InventoryFixture) -> Self {
        let next_product = data.products.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
        let next_entry = data.stock_entries.iter().map(|e| e.id.get()).max().unwrap_or(0) + 1;
        let next_order = data.production_orders.iter().map(|o| o.id.get()).max().unwrap_or(0) + 1;
        Self {
            data,
            next_product,
            next_entry,
            next_order,
        }
    }

    fn require_unit(&self, id: UnitId) -> Result<(), DomainError> {
        if self.data.units.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown unit {id}")))
        }
    }

    fn require_product(&self, id: ProductId) -> Result<(), DomainError> {
        if self.data.products.iter().any(|p| p.id == id) {
            Ok(())
        } else {
            Err(DomainError::not_found(format!("product {id}")))
        }
    }

    /// The latest entry must keep carrying the balance.
    fn reject_back_dated(&self, product_id: ProductId, date: chrono::NaiveDate) -> Result<(), DomainError> {
        match latest_entry(product_id, &self.data.stock_entries) {
            Some(latest) if date < latest.entry_date => Err(DomainError::conflict(format!(
                "{date} is before the latest stock entry of product {product_id} ({})",
                latest.entry_date
            ))),
            _ => Ok(()),
        }
    }

    fn append_entry(&mut self, product_id: ProductId, entry_date: chrono::NaiveDate, opening: i64, closing: i64) -> StockEntry {
        let entry = StockEntry {
            id: StockEntryId::new(self.next_entry),
            product_id,
            entry_date,
            opening_quantity: opening,
            closing_balance: closing,
        };
        self.next_entry += 1;
        self.data.stock_entries.push(entry.clone());
        entry
    }
}

/// In-memory inventory backend.
///
/// Performs the bookkeeping a real backend would: closing balances on stock
/// additions and a consumption entry per production order.
#[derive(Debug)]
pub struct InMemoryInventoryStore {
    inner: RwLock<State>,
}

impl InMemoryInventoryStore {
    /// Empty store seeded with [`InventoryFixture::standard_units`].
    pub fn new() -> Self {
        Self::from_fixture(InventoryFixture {
            units: InventoryFixture::standard_units(),
            ..InventoryFixture::default()
        })
    }

    pub fn from_fixture(fixture: InventoryFixture) -> Self {
        Self {
            inner: RwLock::new(State::new(fixture)),
        }
    }

    /// Current contents, e.g. for exporting a fixture.
    pub fn export(&self) -> StoreResult<InventoryFixture> {
        Ok(self.read()?.data.clone())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, State>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Transport("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, State>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Transport("in-memory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryInventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list_units(&self) -> StoreResult<Vec<Unit>> {
        Ok(self.read()?.data.units.clone())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read()?.data.products.clone())
    }

    async fn list_stock_entries(&self) -> StoreResult<Vec<StockEntry>> {
        Ok(self.read()?.data.stock_entries.clone())
    }

    async fn list_production_orders(&self) -> StoreResult<Vec<ProductionOrder>> {
        Ok(self.read()?.data.production_orders.clone())
    }

    async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        let mut state = self.write()?;
        state.require_unit(input.unit_id)?;

        let product = Product::create(ProductId::new(state.next_product), input)?;
        state.next_product += 1;
        state.data.products.push(product.clone());

        tracing::debug!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, input: ProductUpdate) -> StoreResult<Product> {
        let mut state = self.write()?;
        state.require_unit(input.unit_id)?;

        let product = state
            .data
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))?;
        product.apply_update(input)?;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut state = self.write()?;
        let before = state.data.products.len();
        state.data.products.retain(|p| p.id != id);
        if state.data.products.len() == before {
            return Err(DomainError::not_found(format!("product {id}")).into());
        }
        tracing::debug!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn add_stock(&self, input: NewStockEntry) -> StoreResult<StockEntry> {
        input.validate()?;
        let mut state = self.write()?;
        state.require_product(input.product_id)?;
        state.reject_back_dated(input.product_id, input.entry_date)?;

        let closing = current_balance(input.product_id, &state.data.stock_entries)
            .checked_add(input.opening_quantity)
            .ok_or_else(|| DomainError::invariant("stock balance overflow"))?;
        let entry = state.append_entry(input.product_id, input.entry_date, input.opening_quantity, closing);

        tracing::debug!(
            product_id = %entry.product_id,
            opening = entry.opening_quantity,
            closing = entry.closing_balance,
            "stock added"
        );
        Ok(entry)
    }

    async fn create_production_order(&self, input: NewProductionOrder) -> StoreResult<ProductionOrder> {
        input.validate()?;
        let mut state = self.write()?;
        state.require_product(input.product_id)?;

        let source = state
            .data
            .stock_entries
            .iter()
            .find(|e| e.id == input.stock_entry_id)
            .ok_or_else(|| DomainError::not_found(format!("stock entry {}", input.stock_entry_id)))?;
        if source.product_id != input.product_id {
            return Err(DomainError::validation(format!(
                "stock entry {} does not belong to product {}",
                input.stock_entry_id, input.product_id
            ))
            .into());
        }

        let balance = current_balance(input.product_id, &state.data.stock_entries);
        if input.quantity_used > balance {
            return Err(DomainError::invariant(format!(
                "insufficient stock: requested {}, available {balance}",
                input.quantity_used
            ))
            .into());
        }
        state.reject_back_dated(input.product_id, input.order_date)?;

        let order = ProductionOrder {
            id: ProductionOrderId::new(state.next_order),
            style_name: input.style_name.trim().to_string(),
            order_date: input.order_date,
            product_id: input.product_id,
            stock_entry_id: input.stock_entry_id,
            quantity_used: input.quantity_used,
            notes: input.notes,
        };
        state.next_order += 1;
        state.data.production_orders.push(order.clone());
        state.append_entry(order.product_id, order.order_date, 0, balance - order.quantity_used);

        tracing::debug!(
            order_id = %order.id,
            product_id = %order.product_id,
            quantity_used = order.quantity_used,
            "production order recorded"
        );
        Ok(order)
    }
}
