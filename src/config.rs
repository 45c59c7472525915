use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub products_path: PathBuf,
    pub carts_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            products_path: std::env::var("PRODUCTS_FILE")
                .unwrap_or_else(|_| "data/products.json".to_string())
                .into(),
            carts_path: std::env::var("CARTS_FILE")
                .unwrap_or_else(|_| "data/carts.json".to_string())
                .into(),
        })
    }
}
