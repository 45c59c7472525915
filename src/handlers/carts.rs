use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::AddToCart,
    AppState,
};

pub async fn list_carts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let carts = state.carts.list().await?;

    info!(count = carts.len(), "Listed carts");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": carts,
            "count": carts.len(),
        })),
    ))
}

pub async fn create_cart(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let cart = state.carts.create().await?;

    info!(cart_id = cart.cart_id, "Created cart");

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "data": cart }))))
}

pub async fn get_cart(
    State(state): State<AppState>,
    cid: Result<Path<u64>, PathRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Path(cid) = cid?;
    let cart = state.carts.get_by_id(cid).await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "data": cart }))))
}

/// `POST /carts/:cid/product/:pid`. The body is optional; an empty body adds one unit.
pub async fn add_product_to_cart(
    State(state): State<AppState>,
    ids: Result<Path<(u64, u64)>, PathRejection>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Path((cid, pid)) = ids?;
    let payload = parse_add_to_cart(&body)?;
    let quantity = payload.quantity.unwrap_or(1);

    let cart = state.carts.add_product(cid, pid, quantity).await?;

    info!(cart_id = cid, product_id = pid, quantity, "Added product to cart");

    Ok((StatusCode::OK, Json(serde_json::json!({ "data": cart }))))
}

fn parse_add_to_cart(body: &[u8]) -> AppResult<AddToCart> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AddToCart::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}
