//! Extract command - print the text extracted from a resume file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::extract;

/// Execute the extract command.
pub fn execute(resume: &Path) -> Result<()> {
    let text = extract::resume_text(resume)
        .with_context(|| format!("Failed to extract text from {}", resume.display()))?;

    println!("{}", text);
    Ok(())
}
