use std::sync::Arc;

use anyhow::Context;

use stockroom_infra::{InMemoryInventoryStore, InventoryFixture, InventoryStore, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    stockroom_observability::init_with(&settings.log);

    let store: Arc<dyn InventoryStore> = match &settings.backend.fixture_path {
        Some(path) => {
            let fixture = InventoryFixture::from_path(path).with_context(|| format!("failed to load fixture {path}"))?;
            tracing::info!(
                path = %path,
                products = fixture.products.len(),
                stock_entries = fixture.stock_entries.len(),
                "seeded in-memory store from fixture"
            );
            Arc::new(InMemoryInventoryStore::from_fixture(fixture))
        }
        None => Arc::new(InMemoryInventoryStore::new()),
    };

    let app = stockroom_api::app::build_app(settings.auth.jwt_secret.clone(), store, settings.ledger);

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
