use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use stockroom_auth::Session;
use stockroom_core::{DomainError, ProductId};
use stockroom_inventory::{
    NewProduct, NewProductionOrder, NewStockEntry, Product, ProductUpdate, ProductionOrder, StockEntry, Unit,
};

use super::{InventoryStore, StoreError, StoreResult};
use crate::config::BackendSettings;

/// Error body returned by the backend (`{error, message}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Inventory store backed by the REST backend.
///
/// Every request carries the session's bearer token. An expired session is
/// rejected locally without a round-trip.
#[derive(Debug, Clone)]
pub struct HttpInventoryStore {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpInventoryStore {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
        }
    }

    /// Build from `[backend]` settings; the configured token becomes the session.
    pub fn from_settings(settings: &BackendSettings) -> StoreResult<Self> {
        let base_url = settings
            .base_url
            .as_deref()
            .ok_or_else(|| StoreError::Transport("backend.base_url is not configured".to_string()))?;
        let token = settings.token.as_deref().ok_or(StoreError::Unauthorized)?;
        let session = Session::from_token(token, Utc::now()).map_err(|e| {
            tracing::warn!(error = %e, "configured backend token rejected");
            StoreError::Unauthorized
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, base_url, session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> StoreResult<RequestBuilder> {
        if self.session.is_expired(Utc::now()) {
            tracing::debug!("session expired; not sending request");
            return Err(StoreError::Unauthorized);
        }
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.request(method, url).bearer_auth(self.session.token()))
    }

    async fn send(&self, req: RequestBuilder) -> StoreResult<Response> {
        let resp = req.send().await.map_err(|e| StoreError::Transport(e.to_string()))?;
        check_status(resp).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> StoreResult<T> {
        let resp = self.send(self.request(Method::GET, path)?).await?;
        decode(resp).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> StoreResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let resp = self.send(self.request(method, path)?.json(body)).await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> StoreResult<T> {
    resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))
}

/// Map a non-success status onto [`StoreError`], keeping the server's message.
async fn check_status(resp: Response) -> StoreResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.message)
        .unwrap_or(text);

    tracing::debug!(status = status.as_u16(), %message, "backend request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => StoreError::Unauthorized,
        StatusCode::NOT_FOUND => DomainError::NotFound(message).into(),
        StatusCode::BAD_REQUEST => DomainError::Validation(message).into(),
        StatusCode::CONFLICT => DomainError::Conflict(message).into(),
        StatusCode::UNPROCESSABLE_ENTITY => DomainError::InvariantViolation(message).into(),
        other => StoreError::Status {
            status: other.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl InventoryStore for HttpInventoryStore {
    async fn list_units(&self) -> StoreResult<Vec<Unit>> {
        self.get_json("/api/units").await
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.get_json("/api/products").await
    }

    async fn list_stock_entries(&self) -> StoreResult<Vec<StockEntry>> {
        self.get_json("/api/stock").await
    }

    async fn list_production_orders(&self) -> StoreResult<Vec<ProductionOrder>> {
        self.get_json("/api/orders").await
    }

    async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        self.send_json(Method::POST, "/api/products", &input).await
    }

    async fn update_product(&self, id: ProductId, input: ProductUpdate) -> StoreResult<Product> {
        self.send_json(Method::PUT, &format!("/api/products/{id}"), &input).await
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let req = self.request(Method::DELETE, &format!("/api/products/{id}"))?;
        self.send(req).await.map(|_| ())
    }

    async fn add_stock(&self, input: NewStockEntry) -> StoreResult<StockEntry> {
        self.send_json(Method::POST, "/api/stock", &input).await
    }

    async fn create_production_order(&self, input: NewProductionOrder) -> StoreResult<ProductionOrder> {
        self.send_json(Method::POST, "/api/orders", &input).await
    }
}
