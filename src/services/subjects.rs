//! Subject Catalog
//!
//! Read-only view over `subjects.json`. The file is re-read on every load so
//! edits show up without a restart.

use std::collections::BTreeSet;
use std::path::Path;

use crate::models::subject::{Subject, SubjectCatalogFile};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// Load the catalog file; a missing file is an empty catalog.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::warn!("[Subjects] Catalog file not found: {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let file: SubjectCatalogFile = serde_json::from_str(&content)?;
        Ok(Self::new(file.subjects))
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.subjects
            .iter()
            .map(|s| s.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct subcategories of `category`, sorted.
    pub fn subcategories(&self, category: &str) -> AppResult<Vec<String>> {
        let found: BTreeSet<String> = self
            .subjects
            .iter()
            .filter(|s| s.category == category)
            .filter_map(|s| s.subcategory.clone())
            .collect();

        if found.is_empty() {
            return Err(AppError::not_found(format!(
                "No subcategories found for category: {}",
                category
            )));
        }
        Ok(found.into_iter().collect())
    }
}
