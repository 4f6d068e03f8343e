use crate::models::ModelOptions;
use crate::prelude::{println, *};
use codereview_core::plan::Budget;
use codereview_core::prompt::build_messages;
use codereview_core::tokens::{num_tokens_from_messages, resolve};
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Args, Clone)]
#[command(about = "Show prompt token usage per file without calling the API")]
pub struct App {
    /// Source files to measure
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[clap(flatten)]
    model: ModelOptions,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct TokenReport {
    pub file: String,
    #[serde(flatten)]
    pub budget: Option<Budget>,
    pub fits: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Measure the review prompt for one file. Unreadable files get an error row.
pub async fn measure_file(path: &Path, model: &str, context_window: usize) -> TokenReport {
    let file = path.display().to_string();

    let measured = match tokio::fs::read_to_string(path).await {
        Ok(code) => num_tokens_from_messages(&build_messages(&code), model)
            .map(|tokens| (code.is_empty(), Budget::new(tokens, context_window)))
            .map_err(|e| e.to_string()),
        Err(e) => Err(format!("Failed to read {file}: {e}")),
    };

    match measured {
        Ok((empty, budget)) => TokenReport {
            file,
            fits: !empty && budget.fits(),
            budget: Some(budget),
            error: None,
        },
        Err(error) => {
            log::warn!("Skipping token count for {}: {}", file, error);
            TokenReport {
                file,
                budget: None,
                fits: false,
                error: Some(error),
            }
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let resolved = resolve(&app.model.model).map_err(|e| eyre!(e))?;

    if global.verbose {
        println!("Counting tokens as {}", resolved.name);
        println!();
    }

    let mut reports = Vec::with_capacity(app.files.len());
    for path in &app.files {
        reports.push(measure_file(path, &app.model.model, app.model.context_window).await);
    }

    if app.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["FILE", "PROMPT", "REMAINING", "FITS"]);
    for report in &reports {
        match (&report.budget, &report.error) {
            (Some(budget), _) => table.add_row(prettytable::row![
                report.file,
                budget.prompt_tokens,
                budget.remaining,
                if report.fits { "yes" } else { "no" }
            ]),
            (None, error) => table.add_row(prettytable::row![
                report.file,
                "-",
                "-",
                error.as_deref().unwrap_or("error")
            ]),
        };
    }
    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_unreadable_file_gets_its_own_row() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.py");
        std::fs::write(&good, "print('ok')").unwrap();
        let missing = dir.path().join("missing.py");

        let good_report = measure_file(&good, "gpt-4o-mini", 8192).await;
        let missing_report = measure_file(&missing, "gpt-4o-mini", 8192).await;

        assert!(good_report.error.is_none());
        assert!(good_report.fits);
        let budget = good_report.budget.unwrap();
        assert_eq!(budget.remaining, 8192 - budget.prompt_tokens);

        assert!(missing_report.budget.is_none());
        assert!(!missing_report.fits);
        assert!(missing_report.error.unwrap().contains("Failed to read"));
    }

    #[tokio::test]
    async fn test_empty_file_does_not_fit() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.py");
        std::fs::write(&empty, "").unwrap();

        let report = measure_file(&empty, "gpt-4o-mini", 8192).await;
        assert!(report.budget.is_some());
        assert!(!report.fits);
    }

    #[tokio::test]
    async fn test_error_row_serializes_without_budget() {
        let dir = TempDir::new().unwrap();
        let report = measure_file(&dir.path().join("nope.rs"), "gpt-4o-mini", 8192).await;
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("prompt_tokens").is_none());
        assert!(json.get("error").is_some());
        assert_eq!(json["fits"], serde_json::json!(false));
    }
}
