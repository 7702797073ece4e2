//! Gemini API client.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::normalizer::{self, NormalizedReply};
use crate::prompt::PromptBuilder;

/// Gemini REST endpoint base for text generation.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini generateContent API.
///
/// The API key is passed in at construction; there is no ambient
/// credential state.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

/// Gemini generateContent request body.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Gemini generateContent response body.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// API-level error payload.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl GeminiClient {
    /// Create a client for the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a client for a specific model.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Evaluate a resume against a job description.
    ///
    /// Renders the evaluation prompt, calls the model, and normalizes the
    /// reply. The returned record always satisfies the field invariants;
    /// only transport and prompt errors surface as `Err`.
    pub fn evaluate(&self, job_description: &str, resume_text: &str) -> Result<NormalizedReply> {
        let prompt = PromptBuilder::new().render_evaluation(job_description, resume_text)?;
        let raw = self.generate(&prompt)?;
        Ok(normalizer::normalize(&raw))
    }

    /// Send a single prompt to the model and return its raw text reply.
    ///
    /// An empty candidate list yields an empty string; the normalizer
    /// downstream treats that as a malformed reply.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE,
            self.model,
            urlencoding::encode(&self.api_key)
        );

        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            // The error body usually carries a useful message
            let detail = response
                .json::<GenerateResponse>()
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or_else(|| "no detail".to_string());
            anyhow::bail!("Gemini request failed: {} ({})", status, detail);
        }

        let generate_response: GenerateResponse = response
            .json()
            .context("Failed to parse Gemini response")?;

        if let Some(error) = generate_response.error {
            anyhow::bail!("Gemini API error {}: {}", error.code, error.message);
        }

        let text = generate_response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"percentage_match\": 50}"}]}}
            ]
        }"#;

        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            response.candidates[0].content.parts[0].text,
            "{\"percentage_match\": 50}"
        );
    }

    #[test]
    fn test_error_payload_parses() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, 400);
        assert_eq!(error.message, "API key not valid");
        assert!(response.candidates.is_empty());
    }

    #[test]
    #[ignore = "requires network and GEMINI_API_KEY"]
    fn test_evaluate() {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap();
        let client = GeminiClient::new(api_key);

        let reply = client
            .evaluate(
                "a Backend Engineer",
                "Jane Doe. 5 years of Rust, PostgreSQL, and Kubernetes.",
            )
            .unwrap();

        assert!(!reply.is_fallback());
        assert!(!reply.evaluation.missing_keywords.is_empty());
        println!("{:#?}", reply.evaluation);
    }
}
