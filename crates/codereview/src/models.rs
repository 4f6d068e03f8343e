use crate::prelude::{println, *};
use codereview_core::plan::DEFAULT_CONTEXT_WINDOW;
use codereview_core::tokens::{lookup, ModelCosts, DEFAULT_MODEL, MODELS};

#[derive(Debug, clap::Args)]
#[command(about = "List the supported models")]
pub struct App {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Model and context options shared by the subcommands that count tokens.
#[derive(Debug, Clone, clap::Args)]
pub struct ModelOptions {
    /// Model used for token counting and completions
    #[arg(short, long, env = "CODEREVIEW_MODEL", default_value = DEFAULT_MODEL, value_parser = parse_model)]
    pub model: String,

    /// Total tokens shared by the prompt and the reply
    #[arg(long, env = "CODEREVIEW_CONTEXT_WINDOW", default_value_t = DEFAULT_CONTEXT_WINDOW)]
    pub context_window: usize,
}

/// Reject models outside the supported table before any file is read.
fn parse_model(model: &str) -> std::result::Result<String, String> {
    lookup(model)
        .map(|spec| spec.name.to_string())
        .map_err(|e| e.to_string())
}

#[derive(Debug, serde::Serialize)]
struct ModelRow {
    model: &'static str,
    tokens_per_message: Option<i64>,
    tokens_per_name: Option<i64>,
    alias_of: Option<&'static str>,
}

fn model_rows() -> Vec<ModelRow> {
    MODELS
        .iter()
        .map(|spec| match spec.costs {
            ModelCosts::Alias(target) => ModelRow {
                model: spec.name,
                tokens_per_message: None,
                tokens_per_name: None,
                alias_of: Some(target),
            },
            ModelCosts::Fixed {
                tokens_per_message,
                tokens_per_name,
            } => ModelRow {
                model: spec.name,
                tokens_per_message: Some(tokens_per_message),
                tokens_per_name: Some(tokens_per_name),
                alias_of: None,
            },
        })
        .collect()
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let rows = model_rows();

    if app.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if global.verbose {
        println!("Default model: {}", DEFAULT_MODEL);
        println!();
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["MODEL", "TOKENS/MESSAGE", "TOKENS/NAME", "ALIAS OF"]);
    for r in rows {
        let show = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
        table.add_row(prettytable::row![
            r.model,
            show(r.tokens_per_message),
            show(r.tokens_per_name),
            r.alias_of.unwrap_or("")
        ]);
    }
    table.printstd();

    Ok(())
}
