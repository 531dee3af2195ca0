//! Subject Catalog Models

use serde::{Deserialize, Serialize};

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// On-disk catalog file layout: `{"subjects": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectCatalogFile {
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// Explanation cache write body
#[derive(Debug, Clone, Deserialize)]
pub struct ExplanationBody {
    pub explanation: String,
}

/// Explanation cache read response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: Option<String>,
}
