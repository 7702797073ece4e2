//! ats-check - evaluate a resume against a job description with Gemini.
//!
//! Reads a resume (PDF or plain text), renders an evaluation prompt, sends
//! it to the Gemini generateContent API, and prints a normalized report:
//! match percentage, missing keywords, suggestions, and candidate name.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod api;
mod commands;
mod extract;
mod normalizer;
mod prompt;

#[derive(Parser)]
#[command(name = "ats-check")]
#[command(author, version, about = "ATS resume checker powered by Gemini")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a resume against a job description
    Check {
        /// Path to the resume (.pdf, .txt or .md)
        resume: PathBuf,

        /// Read the job description from a file
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Pass the job description inline
        #[arg(short = 't', long)]
        job_text: Option<String>,

        /// Output format (human, json)
        #[arg(short, long, default_value = "human")]
        format: String,

        /// Gemini model to use
        #[arg(short, long, default_value = api::DEFAULT_MODEL)]
        model: String,

        /// Gemini API key (default: GEMINI_API_KEY environment variable)
        #[arg(long)]
        api_key: Option<String>,

        /// Ignore cached evaluations, always call the model
        #[arg(long)]
        refresh: bool,
    },

    /// Print the text extracted from a resume file
    Extract {
        /// Path to the resume (.pdf, .txt or .md)
        resume: PathBuf,
    },

    /// Clear cached evaluations
    CleanCache,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            resume,
            job,
            job_text,
            format,
            model,
            api_key,
            refresh,
        } => {
            let output_format = match format.to_lowercase().as_str() {
                "json" => commands::check::OutputFormat::Json,
                _ => commands::check::OutputFormat::Human,
            };

            let job_description = match (job_text, job) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path).with_context(|| {
                    format!("Failed to read job description: {}", path.display())
                })?,
                (None, None) => {
                    anyhow::bail!("Provide a job description via --job or --job-text")
                }
            };

            let api_key = match api_key.or_else(|| std::env::var("GEMINI_API_KEY").ok()) {
                Some(key) if !key.trim().is_empty() => key,
                _ => anyhow::bail!("No API key: pass --api-key or set GEMINI_API_KEY"),
            };

            let options = commands::check::CheckOptions {
                format: output_format,
                model,
                refresh,
            };

            commands::check::execute(&resume, &job_description, &api_key, &options)
        }

        Commands::Extract { resume } => commands::extract::execute(&resume),

        Commands::CleanCache => commands::util::execute_clean_cache(),
    }
}
