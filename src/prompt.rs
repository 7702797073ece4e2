//! Evaluation prompt rendering.
//!
//! The prompt embeds the job description and resume text and pins the
//! model down to a single JSON object with exactly four keys; the
//! normalizer handles whatever comes back anyway.

use anyhow::{Context, Result};
use minijinja::Environment;

/// Context for rendering the evaluation prompt.
#[derive(Debug, serde::Serialize)]
struct EvaluationContext {
    job_description: String,
    resume_text: String,
}

/// Renders prompts for the evaluation call.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// Create a new prompt builder.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template(
            "evaluation",
            include_str!("../templates/evaluation.prompt.jinja"),
        )
        .expect("Failed to add evaluation template");
        Self { env }
    }

    /// Render the evaluation prompt for a job description and resume.
    pub fn render_evaluation(&self, job_description: &str, resume_text: &str) -> Result<String> {
        let ctx = EvaluationContext {
            job_description: job_description.to_string(),
            resume_text: resume_text.to_string(),
        };

        let template = self.env.get_template("evaluation")?;
        template
            .render(&ctx)
            .context("Failed to render evaluation prompt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_inputs() {
        let builder = PromptBuilder::new();
        let prompt = builder
            .render_evaluation("a Backend Engineer", "Jane Doe\n5 years of Rust")
            .unwrap();

        assert!(prompt.contains("a Backend Engineer"));
        assert!(prompt.contains("5 years of Rust"));
        assert!(prompt.contains("\"percentage_match\""));
        assert!(prompt.contains("\"missing_keywords\""));
        assert!(prompt.contains("\"suggestions\""));
        assert!(prompt.contains("\"candidate_name\""));
    }

    #[test]
    fn test_render_keeps_literal_braces() {
        // The example object in the template must survive rendering
        let builder = PromptBuilder::new();
        let prompt = builder.render_evaluation("a role", "a resume").unwrap();
        assert!(prompt.contains(r#"{"percentage_match": 78"#));
    }
}
