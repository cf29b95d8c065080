//! blush-shop - Storefront service for a makeup artist's shop

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blush_shop::config::AppConfig;
use blush_shop::domain::Product;
use blush_shop::gateway::{CatalogGateway, CatalogPage, OrderAck, OrderGateway, OrderRequest};

#[derive(Clone)]
struct AppState {
    catalog: CatalogGateway,
    orders: OrderGateway,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    if config.supplier.is_demo() {
        tracing::warn!("SUPPLIER_API_TOKEN not set, running in demo mode");
    }
    let state = AppState {
        catalog: CatalogGateway::new(config.supplier.clone()),
        orders: OrderGateway::new(config.supplier.clone()),
    };

    let app = Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "blush-shop"})) }))
        .route("/api/products", get(list_products))
        .route("/api/products/:id", get(get_product))
        .route("/api/orders", post(submit_order))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("blush-shop listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ListParams {
    page: Option<u32>,
    page_size: Option<u32>,
    category: Option<String>,
}

async fn list_products(State(s): State<AppState>, Query(p): Query<ListParams>) -> Json<CatalogPage> {
    let page = p.page.unwrap_or(1).max(1);
    let page_size = p.page_size.unwrap_or(20).clamp(1, 100);
    Json(s.catalog.list_products(page, page_size, p.category.as_deref()).await)
}

async fn get_product(State(s): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>, (StatusCode, String)> {
    s.catalog.get_product(&id).await.map(Json).ok_or((StatusCode::NOT_FOUND, "Not found".to_string()))
}

async fn submit_order(
    State(s): State<AppState>,
    Json(order): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderAck>), (StatusCode, Json<serde_json::Value>)> {
    match s.orders.submit_order(&order).await {
        Ok(ack) => Ok((StatusCode::CREATED, Json(ack))),
        Err(e) => {
            let status = if e.is_validation() { StatusCode::BAD_REQUEST } else { StatusCode::INTERNAL_SERVER_ERROR };
            Err((status, Json(serde_json::json!({"error": e.to_string()}))))
        }
    }
}
