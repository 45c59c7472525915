//! JSON-file persistence. Each collection lives in one document of the shape
//! `{ "<key>": [ ...records ] }` that is read whole and rewritten whole.

mod carts;
mod products;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::{AppError, AppResult};

pub use carts::CartStore;
pub use products::ProductStore;

/// `max(ids) + 1`, starting at 1 for an empty collection.
fn next_id(ids: impl Iterator<Item = u64>) -> AppResult<u64> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| AppError::Internal("record id space exhausted".to_string()))
}

/// One collection file on disk.
#[derive(Debug)]
pub struct CollectionFile {
    path: PathBuf,
    key: &'static str,
    write_lock: Mutex<()>,
}

impl CollectionFile {
    pub fn new(path: impl Into<PathBuf>, key: &'static str) -> Self {
        Self {
            path: path.into(),
            key,
            write_lock: Mutex::new(()),
        }
    }

    /// Held for the whole read-modify-write cycle of a mutation.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Reads every record. A missing file, missing key or `null` value is an
    /// empty collection.
    pub async fn load<T: DeserializeOwned>(&self) -> AppResult<Vec<T>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut doc: Value = serde_json::from_str(&raw)?;
        match doc.get_mut(self.key).map(Value::take) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(records) => Ok(serde_json::from_value(records)?),
        }
    }

    /// Rewrites the whole document. The bytes go to a sibling `.tmp` file
    /// first and are renamed into place.
    pub async fn save<T: Serialize>(&self, records: &[T]) -> AppResult<()> {
        let doc = HashMap::from([(self.key, records)]);
        let bytes = serde_json::to_vec_pretty(&doc)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), count = records.len(), "Saved collection");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn collection(dir: &TempDir) -> (CollectionFile, PathBuf) {
        let path = dir.path().join("items.json");
        (CollectionFile::new(&path, "items"), path)
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_id(std::iter::empty()).unwrap(), 1);
        assert_eq!(next_id([3, 7, 5].into_iter()).unwrap(), 8);
        assert!(matches!(
            next_id([u64::MAX].into_iter()),
            Err(AppError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let (file, _) = collection(&dir);
        let items: Vec<Value> = file.load().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn missing_or_null_key_loads_empty() {
        let dir = TempDir::new().unwrap();
        let (file, path) = collection(&dir);

        std::fs::write(&path, r#"{ "other": [1, 2] }"#).unwrap();
        assert!(file.load::<Value>().await.unwrap().is_empty());

        std::fs::write(&path, r#"{ "items": null }"#).unwrap();
        assert!(file.load::<Value>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let (file, path) = collection(&dir);
        std::fs::write(&path, "{ not json").unwrap();

        let err = file.load::<Value>().await.unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[tokio::test]
    async fn save_writes_pretty_document_under_key() {
        let dir = TempDir::new().unwrap();
        let (file, path) = collection(&dir);
        file.save(&[json!({ "a": 1 })]).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "{\n  \"items\": [\n    {\n      \"a\": 1\n    }\n  ]\n}");
        assert!(!dir.path().join("items.json.tmp").exists(), "temp file must be renamed away");
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/data/items.json");
        let file = CollectionFile::new(&path, "items");
        file.save::<Value>(&[]).await.unwrap();

        let loaded: Vec<Value> = file.load().await.unwrap();
        assert!(loaded.is_empty());
        assert!(path.exists());
    }
}
