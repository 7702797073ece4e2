//! Utility commands (cache management).

use anyhow::Result;

use crate::api::EvaluationCache;

/// Clear cached evaluations.
pub fn execute_clean_cache() -> Result<()> {
    let cache = EvaluationCache::new();
    match cache.clear() {
        Ok((count, dir)) => {
            println!(
                "Cleared evaluation cache: {} file(s) removed ({})",
                count,
                dir.display()
            );
        }
        Err(e) => {
            eprintln!("Failed to clear evaluation cache: {}", e);
        }
    }

    Ok(())
}
