//! Gemini API client module.

mod cache;
mod client;
mod types;

pub use cache::{CachedEvaluation, EvaluationCache};
pub use client::{GeminiClient, DEFAULT_MODEL};
pub use types::Evaluation;
