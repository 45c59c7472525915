use std::path::PathBuf;
use std::sync::Arc;

use super::{next_id, CollectionFile, ProductStore};
use crate::error::{AppError, AppResult};
use crate::models::Cart;

/// Carts reference products by id; existence is checked against the
/// product store only when a line item is added.
#[derive(Debug)]
pub struct CartStore {
    file: CollectionFile,
    products: Arc<ProductStore>,
}

fn not_found(id: u64) -> AppError {
    AppError::NotFound(format!("Cart {} not found", id))
}

impl CartStore {
    pub fn new(path: impl Into<PathBuf>, products: Arc<ProductStore>) -> Self {
        Self {
            file: CollectionFile::new(path, "carts"),
            products,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Cart>> {
        self.file.load().await
    }

    pub async fn create(&self) -> AppResult<Cart> {
        let _guard = self.file.lock().await;
        let mut carts = self.list().await?;

        let cart = Cart::new(next_id(carts.iter().map(|c| c.cart_id))?);
        carts.push(cart.clone());
        self.file.save(&carts).await?;

        Ok(cart)
    }

    pub async fn get_by_id(&self, id: u64) -> AppResult<Cart> {
        self.list()
            .await?
            .into_iter()
            .find(|c| c.cart_id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Adds `quantity` of a product to a cart and returns the updated cart.
    /// Nothing is written unless both the cart and the product exist.
    pub async fn add_product(&self, cart_id: u64, product_id: u64, quantity: u64) -> AppResult<Cart> {
        if quantity == 0 {
            return Err(AppError::BadRequest(
                "quantity must be at least 1".to_string(),
            ));
        }

        let _guard = self.file.lock().await;
        let mut carts = self.list().await?;

        let index = carts
            .iter()
            .position(|c| c.cart_id == cart_id)
            .ok_or_else(|| not_found(cart_id))?;

        self.products.get_by_id(product_id).await?;

        carts[index].add_item(product_id, quantity);
        let cart = carts[index].clone();
        self.file.save(&carts).await?;

        Ok(cart)
    }
}
