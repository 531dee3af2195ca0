//! Learning Profile Models
//!
//! The stored assessment record. Every score is optional because learners may
//! complete the assessment in parts.

use serde::{Deserialize, Deserializer, Serialize};
use tutor_cascade_core::UserProfile;

/// Stored learning profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProfile {
    pub id: i64,
    pub user_id: i64,
    pub verbal_score: Option<f64>,
    pub non_verbal_score: Option<f64>,
    /// Scale of 1-10
    pub self_assessment: Option<i64>,
    pub age: Option<i64>,
}

impl LearningProfile {
    /// Snapshot for the tutoring pipeline. `None` unless every field is set.
    pub fn to_user_profile(&self) -> Option<UserProfile> {
        Some(UserProfile {
            verbal_score: self.verbal_score?,
            non_verbal_score: self.non_verbal_score?,
            self_assessment: self.self_assessment? as f64,
            age: self.age?,
        })
    }

    /// Apply only the fields present in `input`.
    pub fn apply(&mut self, input: LearningProfileInput) {
        if let Some(v) = input.verbal_score {
            self.verbal_score = v;
        }
        if let Some(v) = input.non_verbal_score {
            self.non_verbal_score = v;
        }
        if let Some(v) = input.self_assessment {
            self.self_assessment = v;
        }
        if let Some(v) = input.age {
            self.age = v;
        }
    }
}

/// Create/update request body.
///
/// Outer `None`: field absent from the request. `Some(None)`: explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LearningProfileInput {
    #[serde(default, deserialize_with = "present")]
    pub verbal_score: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub non_verbal_score: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub self_assessment: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<i64>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
