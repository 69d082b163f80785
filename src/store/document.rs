use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::Collection;
use crate::error::StockroomError;

/// Size of a stored value as reported back to the writer. `None` for values
/// that have no size (numbers, booleans, null).
pub type RecordCount = Option<usize>;

/// Whole-document JSON storage rooted at a data directory.
///
/// No caching: every `get` re-reads the file and every `put` rewrites it in full.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: Arc<PathBuf>,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    /// Read and parse a collection. A collection that was never written is `[]`.
    pub async fn get(&self, collection: Collection) -> Result<Value, StockroomError> {
        let path = self.path_for(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%collection, "collection not yet written; returning empty");
                return Ok(Value::Array(Vec::new()));
            }
            Err(e) => return Err(StockroomError::storage(path, e)),
        };
        serde_json::from_slice(&bytes)
            .map_err(|source| StockroomError::MalformedStoredDocument { path, source })
    }

    /// Replace a collection with `value`.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// target, so concurrent readers see either the old or the new document.
    pub async fn put(
        &self,
        collection: Collection,
        value: &Value,
    ) -> Result<RecordCount, StockroomError> {
        let body = serde_json::to_vec_pretty(value)?;
        let dir = self.root.to_path_buf();
        let path = self.path_for(collection);
        let written = body.len();

        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, collection, &body))
            .await
            .map_err(|e| StockroomError::UnexpectedError(format!("write task failed: {e}")))??;

        debug!(%collection, bytes = written, "collection replaced");
        Ok(record_count(value))
    }
}

fn write_atomic(
    dir: &Path,
    path: &Path,
    collection: Collection,
    body: &[u8],
) -> Result<(), StockroomError> {
    fs::create_dir_all(dir).map_err(|e| StockroomError::storage(dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", collection.file_name()))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StockroomError::storage(dir, e))?;
    tmp.write_all(body)
        .map_err(|e| StockroomError::storage(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StockroomError::storage(tmp.path(), e))?;

    // rename(2) within one directory is atomic on POSIX
    tmp.persist(path)
        .map_err(|e| StockroomError::storage(path, e.error))?;
    Ok(())
}

/// Arrays report their element count, objects their key count and strings
/// their character count.
pub fn record_count(value: &Value) -> RecordCount {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::String(s) => Some(s.chars().count()),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}
