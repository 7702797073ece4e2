//! Resume text extraction.
//!
//! PDFs go through pdf-extract; `.txt` and `.md` files are read as UTF-8.
//! Extracted text is tidied so the prompt does not carry pages of blank
//! lines: line ends trimmed, blank-line runs collapsed to single
//! separators, no leading or trailing blank lines.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors from resume text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text from PDF {path}: {source}")]
    Pdf {
        path: String,
        #[source]
        source: pdf_extract::OutputError,
    },

    #[error("unsupported resume format: {0} (expected .pdf, .txt or .md)")]
    UnsupportedFormat(String),

    #[error("no extractable text in {0}")]
    EmptyDocument(String),
}

/// Extract the text of a resume file.
pub fn resume_text(path: &Path) -> Result<String, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let raw = match ext.as_str() {
        "pdf" => {
            let bytes = fs::read(path).map_err(|e| ExtractError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf {
                path: path.display().to_string(),
                source: e,
            })?
        }
        "txt" | "md" => fs::read_to_string(path).map_err(|e| ExtractError::Io {
            path: path.display().to_string(),
            source: e,
        })?,
        _ => return Err(ExtractError::UnsupportedFormat(path.display().to_string())),
    };

    let text = tidy(&raw);
    if text.is_empty() {
        return Err(ExtractError::EmptyDocument(path.display().to_string()));
    }

    Ok(text)
}

/// Collapse extraction noise.
fn tidy(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_pending = false;

    for line in raw.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_pending = !lines.is_empty();
            continue;
        }
        if blank_pending {
            lines.push("");
            blank_pending = false;
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_tidy_collapses_blank_runs() {
        let raw = "\n\nJane Doe  \n\n\n\nExperience\nRust developer\n\n\n";
        assert_eq!(tidy(raw), "Jane Doe\n\nExperience\nRust developer");
    }

    #[test]
    fn test_tidy_empty_input() {
        assert_eq!(tidy(""), "");
        assert_eq!(tidy("\n \n\t\n"), "");
    }

    #[test]
    fn test_plain_text_resume() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Jane Doe\n\n\nRust, PostgreSQL").unwrap();

        let text = resume_text(file.path()).unwrap();
        assert_eq!(text, "Jane Doe\n\nRust, PostgreSQL");
    }

    #[test]
    fn test_unsupported_format() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let err = resume_text(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_empty_document() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "  \n\n ").unwrap();

        let err = resume_text(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyDocument(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = resume_text(Path::new("does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let mut file = tempfile::Builder::new().suffix(".TXT").tempfile().unwrap();
        write!(file, "Jane Doe").unwrap();

        assert_eq!(resume_text(file.path()).unwrap(), "Jane Doe");
    }
}
