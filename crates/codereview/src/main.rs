use crate::prelude::*;
use clap::Parser;

mod analyzer;
mod error;
mod models;
mod openai;
mod prelude;
mod review;
mod tokens;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Review source files with a chat completion model"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "CODEREVIEW_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Review source files and print recommendations
    Review(crate::review::App),

    /// Show prompt token usage per file without calling the API
    Tokens(crate::tokens::App),

    /// List the supported models
    Models(crate::models::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Review(sub_app) => crate::review::run(sub_app, app.global).await,
        SubCommands::Tokens(sub_app) => crate::tokens::run(sub_app, app.global).await,
        SubCommands::Models(sub_app) => crate::models::run(sub_app, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
