use crate::analyzer::Reviewer;
use crate::models::ModelOptions;
use crate::openai::{OpenAiBackend, OpenAiConfig, DEFAULT_BASE_URL};
use crate::prelude::{eprintln, println, *};
use codereview_core::cache::ReviewCache;
use codereview_core::review::{FileReview, ReviewStatus};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
#[command(about = "Review source files and print recommendations")]
pub struct App {
    /// Source files to review
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[clap(flatten)]
    model: ModelOptions,

    /// Base URL of the OpenAI compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API key (Bearer token)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CODEREVIEW_TIMEOUT")]
    timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config =
        OpenAiConfig::new(app.base_url.clone(), app.api_key.clone())?.with_timeout(app.timeout);

    if global.verbose {
        eprintln!("API URL: {}", config.completions_url());
        eprintln!("Model: {}", app.model.model);
        eprintln!("Context window: {}", app.model.context_window);
        eprintln!("Files: {}", app.files.len());
    }

    let backend = OpenAiBackend::new(&config)?;
    let mut reviewer = Reviewer::new(
        backend,
        ReviewCache::new(),
        &app.model.model,
        app.model.context_window,
    )
    .map_err(|e| eyre!(e))?;

    if app.json {
        let reviews = reviewer.analyze_files(&app.files).await;
        println!("{}", serde_json::to_string_pretty(&reviews)?);
        return Ok(());
    }

    // Print as each file finishes so long batches show progress.
    let mut reviewed = 0;
    for path in &app.files {
        let review = reviewer.analyze_file(path).await;
        if review.is_success() {
            reviewed += 1;
        }
        output_formatted(&review, global.verbose);
    }

    if global.verbose {
        eprintln!("Reviewed {} of {} files", reviewed, app.files.len());
        eprintln!("Cached reviews: {}", reviewer.cache().len());
    }

    Ok(())
}

fn status_label(status: ReviewStatus) -> colored::ColoredString {
    match status {
        ReviewStatus::Reviewed => "reviewed".green(),
        ReviewStatus::Empty => "empty".dimmed(),
        ReviewStatus::TooLong => "too long".yellow(),
        ReviewStatus::Failed => "failed".red(),
    }
}

fn output_formatted(review: &FileReview, verbose: bool) {
    println!(
        "{} [{}]",
        review.code_file.bold().cyan(),
        status_label(review.status)
    );

    if verbose && !review.code_snippet.is_empty() {
        println!("{}", "Code:".bold());
        println!("{}", review.code_snippet.dimmed());
        println!();
    }

    println!("{}", review.recommendation);
    println!();
}
