//! Learner Profile
//!
//! Cognitive-style snapshot used to steer the tone of the final tutoring answer.
//! Pure data: the pipeline reads it, never mutates it.

use serde::{Deserialize, Serialize};

/// A learner's verbal/non-verbal/self-assessment scores and age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Verbal reasoning score (assessment scale 0-2)
    pub verbal_score: f64,
    /// Non-verbal reasoning score (assessment scale 0-2)
    pub non_verbal_score: f64,
    /// Self-reported confidence (0-10)
    pub self_assessment: f64,
    /// Age in years
    pub age: i64,
}

/// Confidence band derived from the self-assessment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    /// `high` above 7, `moderate` above 4, otherwise `low`.
    pub fn from_self_assessment(score: f64) -> Self {
        if score > 7.0 {
            ConfidenceBand::High
        } else if score > 4.0 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Moderate => "moderate",
            ConfidenceBand::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl UserProfile {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_self_assessment(self.self_assessment)
    }

    /// Whether the learner should get the extra-encouragement clause.
    pub fn needs_encouragement(&self) -> bool {
        self.self_assessment < 5.0
    }
}

/// Render a score the way learners see it in prompts.
///
/// Whole numbers keep one decimal place (`8.0`), anything else prints in its
/// shortest exact form (`7.5`, `1.25`).
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}
