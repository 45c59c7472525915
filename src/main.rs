use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod db;
mod error;
mod handlers;
mod models;

use crate::config::Config;
use crate::db::{CartStore, ProductStore};

/// Shared application state, cheap to clone (stores live behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductStore>,
    pub carts: Arc<CartStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let products = Arc::new(ProductStore::new(&config.products_path));
        let carts = Arc::new(CartStore::new(&config.carts_path, products.clone()));
        Self { products, carts }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,shop_service=debug"))?,
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!(
        products = %config.products_path.display(),
        carts = %config.carts_path.display(),
        "Using JSON collection files"
    );

    let app = build_router(AppState::new(&config));

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Products CRUD ───────────────────────────────────────────────────
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )

        // ── Carts ───────────────────────────────────────────────────────────
        .route(
            "/carts",
            get(handlers::carts::list_carts).post(handlers::carts::create_cart),
        )
        .route("/carts/:cid", get(handlers::carts::get_cart))
        .route(
            "/carts/:cid/product/:pid",
            post(handlers::carts::add_product_to_cart),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
