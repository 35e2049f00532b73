//! HTTP API over the listings catalog.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::catalog::Catalog;

pub fn build_router(catalog: Catalog) -> Router {
    let state = Arc::new(AppState { catalog });

    Router::new()
        .route("/api/listings", get(handlers::listings))
        .route("/api/cities", get(handlers::city_list))
        .route("/api/classify", get(handlers::classify))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(catalog: Catalog, host: &str, port: u16) {
    let count = catalog.len();
    let app = build_router(catalog);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!(listings = count, "Locus server listening on http://{}", addr);

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
