use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{AppError, AppResult};

/// Free-form request body for creating or patching a product.
/// Key order is kept so extra fields land on disk the way the client sent them.
pub type ProductPayload = IndexMap<String, Value>;

/// A product record. `title` and `price` are the only typed fields; anything
/// else the client sends is carried verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    /// Kept as a JSON number so `10` stays `10` and `9.99` stays `9.99`.
    pub price: Number,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Product {
    /// Builds a new record from a create payload. A client-supplied `id` is dropped.
    pub fn from_payload(id: u64, mut data: ProductPayload) -> AppResult<Self> {
        let title = present(data.shift_remove("title"));
        let price = present(data.shift_remove("price"));
        let (Some(title), Some(price)) = (title, price) else {
            return Err(AppError::BadRequest(
                "title and price are required".to_string(),
            ));
        };
        data.shift_remove("id");

        Ok(Self {
            id,
            title: expect_title(title)?,
            price: expect_price(price)?,
            extra: data,
        })
    }

    /// Merges `patch` over this record. `id` is never overwritten.
    pub fn apply_patch(&mut self, patch: ProductPayload) -> AppResult<()> {
        for (key, value) in patch {
            match key.as_str() {
                "id" => {}
                "title" => self.title = expect_title(value)?,
                "price" => self.price = expect_price(value)?,
                _ => {
                    self.extra.insert(key, value);
                }
            }
        }
        Ok(())
    }

    /// Case-insensitive title comparison used for the uniqueness check.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Treats `null`, `""` and a zero number the same as an absent key.
fn present(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        other => other,
    }
}

fn expect_title(value: Value) -> AppResult<String> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::String(_) => Err(AppError::BadRequest("title must not be empty".to_string())),
        _ => Err(AppError::BadRequest("title must be a string".to_string())),
    }
}

fn expect_price(value: Value) -> AppResult<Number> {
    match value {
        Value::Number(n) => Ok(n),
        _ => Err(AppError::BadRequest("price must be a number".to_string())),
    }
}
