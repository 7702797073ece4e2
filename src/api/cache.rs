//! Evaluation cache with TTL.
//!
//! Caches normalized evaluations at `~/.ats-check/evaluations/<key>.json`
//! to avoid repeated model calls for the same resume/job pair. Entries
//! expire after 24 hours (checked via file mtime).

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::api::types::Evaluation;

/// A cached evaluation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEvaluation {
    /// Model that produced the evaluation
    pub model: String,
    /// When the model was called
    pub evaluated_at: DateTime<Utc>,
    /// The normalized evaluation
    pub evaluation: Evaluation,
}

/// Cached evaluation data with a time-to-live based on file modification time.
pub struct EvaluationCache {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationCache {
    /// Create a new evaluation cache.
    ///
    /// Cache location: `~/.ats-check/evaluations/`, TTL: 24 hours.
    pub fn new() -> Self {
        let cache_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ats-check")
            .join("evaluations");

        Self {
            cache_dir,
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Create a cache with a custom directory (for testing).
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Cache key for an evaluation: SHA-256 over model, job description,
    /// and resume text (NUL-separated so field boundaries cannot collide).
    pub fn key(model: &str, job_description: &str, resume_text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(model.as_bytes());
        hasher.update([0u8]);
        hasher.update(job_description.as_bytes());
        hasher.update([0u8]);
        hasher.update(resume_text.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Load a cached evaluation if it exists and hasn't expired.
    pub fn load(&self, key: &str) -> Option<CachedEvaluation> {
        let path = self.cache_path(key);

        let metadata = fs::metadata(&path).ok()?;
        let modified = metadata.modified().ok()?;

        // Check TTL via mtime
        if modified.elapsed().unwrap_or(Duration::MAX) > self.ttl {
            return None;
        }

        let content = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Save an evaluation to the cache (best effort).
    pub fn save(&self, key: &str, entry: &CachedEvaluation) {
        if fs::create_dir_all(&self.cache_dir).is_err() {
            return;
        }

        let path = self.cache_path(key);
        if let Ok(content) = serde_json::to_string_pretty(entry) {
            let _ = fs::write(&path, content);
        }
    }

    /// Remove all cached evaluation files.
    pub fn clear(&self) -> Result<(usize, PathBuf), std::io::Error> {
        let dir = &self.cache_dir;
        let mut count = 0;

        if dir.is_dir() {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                    count += 1;
                }
            }
            fs::remove_dir_all(dir)?;
        }

        fs::create_dir_all(dir)?;
        Ok((count, dir.clone()))
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_entry() -> CachedEvaluation {
        CachedEvaluation {
            model: "gemini-2.5-flash".to_string(),
            evaluated_at: Utc::now(),
            evaluation: Evaluation {
                percentage_match: 72.0,
                missing_keywords: vec!["Kubernetes".to_string()],
                suggestions: vec!["Quantify impact in bullet points.".to_string()],
                candidate_name: "Jane Doe".to_string(),
            },
        }
    }

    #[test]
    fn test_cache_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let cache = EvaluationCache::with_dir(temp_dir.path().to_path_buf());

        let key = EvaluationCache::key("gemini-2.5-flash", "Backend Engineer", "resume text");
        assert!(cache.load(&key).is_none());

        cache.save(&key, &sample_entry());

        let loaded = cache.load(&key).unwrap();
        assert_eq!(loaded.model, "gemini-2.5-flash");
        assert_eq!(loaded.evaluation.percentage_match, 72.0);
        assert_eq!(loaded.evaluation.candidate_name, "Jane Doe");
    }

    #[test]
    fn test_key_is_input_sensitive() {
        let base = EvaluationCache::key("m", "job", "resume");
        assert_ne!(base, EvaluationCache::key("m", "job", "other resume"));
        assert_ne!(base, EvaluationCache::key("m", "other job", "resume"));
        assert_ne!(base, EvaluationCache::key("other-model", "job", "resume"));

        // Moving a boundary must not produce the same key
        assert_ne!(
            EvaluationCache::key("m", "ab", "c"),
            EvaluationCache::key("m", "a", "bc")
        );
    }

    #[test]
    fn test_clear_removes_entries() {
        let temp_dir = TempDir::new().unwrap();
        let cache = EvaluationCache::with_dir(temp_dir.path().join("evals"));

        let key = EvaluationCache::key("m", "job", "resume");
        cache.save(&key, &sample_entry());

        let (count, _) = cache.clear().unwrap();
        assert_eq!(count, 1);
        assert!(cache.load(&key).is_none());
    }
}
