use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{error::AppResult, models::ProductPayload, AppState};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let products = state.products.list().await?;

    info!(count = products.len(), "Listed products");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": products,
            "count": products.len(),
        })),
    ))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Json(payload) = payload?;
    let product = state.products.create(payload).await?;

    info!(id = product.id, title = %product.title, "Created product");

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "data": product }))))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Path(id) = id?;
    let product = state.products.get_by_id(id).await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "data": product }))))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let product = state.products.update(id, patch).await?;

    info!(id, "Updated product");

    Ok((StatusCode::OK, Json(serde_json::json!({ "data": product }))))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Path(id) = id?;
    state.products.delete(id).await?;

    info!(id, "Deleted product");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Product deleted",
            "id": id,
        })),
    ))
}
