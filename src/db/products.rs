use std::path::PathBuf;

use serde_json::Value;

use super::{next_id, CollectionFile};
use crate::error::{AppError, AppResult};
use crate::models::{Product, ProductPayload};

#[derive(Debug)]
pub struct ProductStore {
    file: CollectionFile,
}

fn not_found(id: u64) -> AppError {
    AppError::NotFound(format!("Product {} not found", id))
}

fn title_taken(title: &str) -> AppError {
    AppError::Conflict(format!("A product titled '{}' already exists", title))
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: CollectionFile::new(path, "products"),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Product>> {
        self.file.load().await
    }

    pub async fn get_by_id(&self, id: u64) -> AppResult<Product> {
        self.list()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Validates `data`, assigns `max(id) + 1` and appends the record.
    pub async fn create(&self, data: ProductPayload) -> AppResult<Product> {
        let mut product = Product::from_payload(0, data)?;

        let _guard = self.file.lock().await;
        let mut products = self.list().await?;

        if products.iter().any(|p| p.has_title(&product.title)) {
            return Err(title_taken(&product.title));
        }

        product.id = next_id(products.iter().map(|p| p.id))?;
        products.push(product.clone());
        self.file.save(&products).await?;

        Ok(product)
    }

    /// Merges `patch` over the stored record, keeping its id.
    pub async fn update(&self, id: u64, patch: ProductPayload) -> AppResult<Product> {
        let _guard = self.file.lock().await;
        let mut products = self.list().await?;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        if let Some(Value::String(title)) = patch.get("title") {
            if products.iter().any(|p| p.id != id && p.has_title(title)) {
                return Err(title_taken(title));
            }
        }

        let mut updated = products[index].clone();
        updated.apply_patch(patch)?;
        products[index] = updated.clone();
        self.file.save(&products).await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> AppResult<()> {
        let _guard = self.file.lock().await;
        let mut products = self.list().await?;

        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(not_found(id));
        }

        self.file.save(&products).await
    }
}
