//! Evaluation record types.

use serde::{Deserialize, Serialize};

/// A structured resume evaluation.
///
/// Produced by the normalizer from a raw model reply; after normalization
/// every field satisfies its invariant (arrays never empty, name never
/// blank).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// How well the resume matches the job description (intended 0-100,
    /// not strictly validated)
    pub percentage_match: f64,
    /// Skills or keywords the job asks for that the resume lacks
    pub missing_keywords: Vec<String>,
    /// Resume improvement tips
    pub suggestions: Vec<String>,
    /// Candidate name as read from the resume
    pub candidate_name: String,
}

impl Evaluation {
    /// The fixed record substituted when a reply does not parse as JSON.
    pub fn fallback() -> Self {
        Self {
            percentage_match: 0.0,
            missing_keywords: vec!["JSON_PARSE_ERROR".to_string()],
            suggestions: vec![
                "Model did not return valid JSON. Please try again.".to_string(),
            ],
            candidate_name: "Candidate".to_string(),
        }
    }
}
