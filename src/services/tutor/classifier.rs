//! Query Classifier
//!
//! Routes programming questions to the Socratic coding agent. A query is a
//! coding query when it contains any of the keywords below, case-insensitively,
//! anywhere in the text (substring match, so "functions" and "decode" count).

use serde::{Deserialize, Serialize};

/// Keywords that send a query down the coding branch.
pub const CODING_KEYWORDS: [&str; 7] = [
    "python",
    "code",
    "function",
    "loop",
    "variable",
    "algorithm",
    "cpp",
];

/// Which branch of the pipeline handles a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryCategory {
    /// Single call to the coding agent
    Coding,
    /// Vision (optional) → planning → analysis → synthesis
    General,
}

impl std::fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryCategory::Coding => write!(f, "coding"),
            QueryCategory::General => write!(f, "general"),
        }
    }
}

/// Keyword-based query classifier.
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    keywords: Vec<String>,
}

impl QueryClassifier {
    /// Classifier over the fixed coding keyword set.
    pub fn new() -> Self {
        Self::with_keywords(CODING_KEYWORDS)
    }

    /// Classifier over a custom keyword set (matched case-insensitively).
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_coding_query(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    pub fn classify(&self, query: &str) -> QueryCategory {
        if self.is_coding_query(query) {
            QueryCategory::Coding
        } else {
            QueryCategory::General
        }
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
