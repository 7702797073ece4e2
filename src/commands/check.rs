//! Check command - evaluate a resume against a job description.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use tabled::{
    settings::style::Style,
    Table, Tabled,
};

use crate::api::{CachedEvaluation, Evaluation, EvaluationCache, GeminiClient};
use crate::extract;
use crate::normalizer::NormalizedReply;

/// Output format for evaluation results.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Options for the check command.
pub struct CheckOptions {
    pub format: OutputFormat,
    pub model: String,
    pub refresh: bool,
}

/// Table row for missing keywords.
#[derive(Tabled)]
struct KeywordRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Missing keyword")]
    keyword: String,
}

/// Execute the check command.
pub fn execute(
    resume: &Path,
    job_description: &str,
    api_key: &str,
    options: &CheckOptions,
) -> Result<()> {
    let resume_text = extract::resume_text(resume)
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;

    let cache = EvaluationCache::new();
    let key = EvaluationCache::key(&options.model, job_description, &resume_text);

    if !options.refresh {
        if let Some(cached) = cache.load(&key) {
            let reply = NormalizedReply::parsed(cached.evaluation);
            print_reply(&reply, true, options.format);
            return Ok(());
        }
    }

    let client = GeminiClient::with_model(api_key, options.model.clone());
    let reply = client
        .evaluate(job_description, &resume_text)
        .context("Evaluation failed")?;

    // Fallback records are not cached; a retry should ask the model again
    if !reply.is_fallback() {
        cache.save(
            &key,
            &CachedEvaluation {
                model: options.model.clone(),
                evaluated_at: Utc::now(),
                evaluation: reply.evaluation.clone(),
            },
        );
    }

    print_reply(&reply, false, options.format);
    Ok(())
}

fn print_reply(reply: &NormalizedReply, cached: bool, format: OutputFormat) {
    match format {
        OutputFormat::Human => print_human(&reply.evaluation, reply.is_fallback(), cached),
        OutputFormat::Json => println!("{}", reply.to_json_string()),
    }
}

fn print_human(evaluation: &Evaluation, fallback: bool, cached: bool) {
    if fallback {
        eprintln!(
            "{} Model did not return valid JSON; showing the fallback result",
            "!".yellow().bold()
        );
    }

    let cached_note = if cached {
        " (cached)".dimmed().to_string()
    } else {
        String::new()
    };
    println!(
        "{}  match: {}{}",
        evaluation.candidate_name.bold(),
        format_match(evaluation.percentage_match),
        cached_note
    );
    println!();

    let rows: Vec<KeywordRow> = evaluation
        .missing_keywords
        .iter()
        .enumerate()
        .map(|(i, keyword)| KeywordRow {
            index: i + 1,
            keyword: keyword.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!();

    println!("{}", "Suggestions".bold());
    for (i, suggestion) in evaluation.suggestions.iter().enumerate() {
        println!("  {}. {}", i + 1, suggestion);
    }
}

/// Colorize the match percentage by band.
fn format_match(percentage: f64) -> String {
    let display = format!("{}%", percentage);
    if percentage >= 75.0 {
        display.green().bold().to_string()
    } else if percentage >= 50.0 {
        display.yellow().bold().to_string()
    } else {
        display.red().bold().to_string()
    }
}
