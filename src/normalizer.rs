//! Response normalizer for model replies.
//!
//! The prompt asks Gemini for a bare JSON object, but in practice replies
//! arrive wrapped in markdown code fences, padded with prose, or malformed
//! outright. [`normalize`] turns any such reply into a well-formed
//! [`Evaluation`]; it never fails, malformed input degrades to a fixed
//! fallback record.

use regex::Regex;
use serde_json::{Map, Value};

use crate::api::Evaluation;

/// Default when the model reports no missing keywords.
const DEFAULT_MISSING_KEYWORDS: &str =
    "No missing keywords detected, but resume can be improved.";

/// Default when the model reports no suggestions.
const DEFAULT_SUGGESTIONS: &str =
    "No suggestions generated. Consider adding measurable achievements.";

/// Default candidate name when the model leaves it out or blank.
const DEFAULT_CANDIDATE_NAME: &str = "Candidate";

/// Where a normalized record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// The reply parsed as a JSON object (missing fields backfilled)
    Parsed,
    /// The reply did not parse; the record is the fixed fallback
    Fallback,
}

/// A model reply normalized into a well-formed evaluation.
#[derive(Debug, Clone)]
pub struct NormalizedReply {
    pub evaluation: Evaluation,
    pub source: ReplySource,
}

impl NormalizedReply {
    /// Wrap an evaluation that is already known to be well-formed
    /// (e.g. loaded from the cache).
    pub fn parsed(evaluation: Evaluation) -> Self {
        Self {
            evaluation,
            source: ReplySource::Parsed,
        }
    }

    /// Whether the record is the parse-failure fallback.
    pub fn is_fallback(&self) -> bool {
        self.source == ReplySource::Fallback
    }

    /// Serialize the record back to a JSON string.
    ///
    /// The JSON output surface hands callers a serialized record that
    /// they re-parse themselves; kept as-is rather than returning the
    /// typed record there.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.evaluation).expect("evaluation serializes to JSON")
    }
}

/// Normalize a raw model reply into a guaranteed-well-formed evaluation.
///
/// Strips code fences and surrounding prose, parses the remaining JSON,
/// and backfills absent or empty fields with documented defaults. A reply
/// that does not parse as a JSON object yields [`Evaluation::fallback`].
pub fn normalize(raw: &str) -> NormalizedReply {
    let candidate = extract_json_block(raw);

    match serde_json::from_str::<Value>(&candidate) {
        Ok(Value::Object(map)) => NormalizedReply {
            evaluation: backfill(&map),
            source: ReplySource::Parsed,
        },
        // Valid JSON that is not an object (array, string, number) is as
        // useless as a parse error
        _ => NormalizedReply {
            evaluation: Evaluation::fallback(),
            source: ReplySource::Fallback,
        },
    }
}

/// Pull the JSON object candidate out of a raw reply.
///
/// Removes a leading fence marker (triple backtick with an optional
/// case-insensitive `json` tag) and a trailing fence delimiter, then
/// keeps the text between the first `{` and the last `}`. Only the fence
/// markers are removed, never interior content. When no brace pair
/// exists, the whole fence-stripped text is returned.
fn extract_json_block(raw: &str) -> String {
    let text = strip_fence_markers(raw);

    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(s), Some(e)) if e > s => text[s..=e].to_string(),
        _ => text,
    }
}

/// Strip markdown code fence markers from the edges of a reply.
fn strip_fence_markers(text: &str) -> String {
    let mut stripped = text.trim().to_string();

    if let Ok(re) = Regex::new(r"(?i)^```(?:json)?") {
        stripped = re.replace(&stripped, "").trim().to_string();
    }
    if let Ok(re) = Regex::new(r"```$") {
        stripped = re.replace(&stripped, "").trim().to_string();
    }

    stripped
}

/// Build an evaluation from a parsed object, substituting defaults for
/// absent, mistyped, or empty fields.
fn backfill(map: &Map<String, Value>) -> Evaluation {
    Evaluation {
        percentage_match: number_field(map.get("percentage_match")),
        missing_keywords: list_field(map.get("missing_keywords"), DEFAULT_MISSING_KEYWORDS),
        suggestions: list_field(map.get("suggestions"), DEFAULT_SUGGESTIONS),
        candidate_name: name_field(map.get("candidate_name")),
    }
}

/// Read a numeric field, accepting a number or a numeric string.
///
/// Non-finite values are rejected: serde_json writes NaN/inf as `null`,
/// which would break the numeric wire invariant on re-serialization.
fn number_field(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .ok()
            .filter(|f: &f64| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Read a string-array field. Blank elements are dropped; anything that
/// does not leave a non-empty array is replaced by a one-element default.
fn list_field(value: Option<&Value>, default: &str) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(values)) => values
            .iter()
            .map(display_string)
            .filter(|item| !item.trim().is_empty())
            .collect(),
        _ => Vec::new(),
    };

    if items.is_empty() {
        vec![default.to_string()]
    } else {
        items
    }
}

/// Read the candidate name, trimming whitespace. Absent, null, or blank
/// names become the default.
fn name_field(value: Option<&Value>) -> String {
    let name = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    if name.is_empty() {
        DEFAULT_CANDIDATE_NAME.to_string()
    } else {
        name
    }
}

/// Render an array element as display text. The model is told to send
/// strings, but a stray number or object should not sink the whole reply.
fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
