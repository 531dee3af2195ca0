//! Explanation Cache
//!
//! Subcategory → explanation text, held in memory and mirrored to a JSON file
//! after every write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::utils::error::AppResult;

/// JSON-file-backed key-value cache of subject explanations
#[derive(Debug)]
pub struct ExplanationCache {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl ExplanationCache {
    /// Load the cache from `path`; a missing file starts empty.
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };
        tracing::info!(
            "[ExplanationCache] Loaded {} entries from {}",
            entries.len(),
            path.display()
        );
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub async fn get(&self, subcategory: &str) -> Option<String> {
        self.entries.read().await.get(subcategory).cloned()
    }

    /// Store an explanation and rewrite the backing file.
    ///
    /// The in-memory entry only changes once the file write succeeds.
    pub async fn put(&self, subcategory: &str, explanation: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.insert(subcategory.to_string(), explanation);
        let content = serde_json::to_string(&next)?;
        tokio::fs::write(&self.path, content).await?;
        *entries = next;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
