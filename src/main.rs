mod commands;
mod config;
mod fetch;
mod refresh;
mod render;
mod routes;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use soupcal_core::FeedCategory;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

const DEFAULT_LOG_FILTER: &str = "soupcal=info,soupcal_core=info,tower_http=info";

#[derive(Parser)]
#[command(name = "soupcal")]
#[command(about = "Turn food program listings into subscribable calendar feeds")]
struct Cli {
    /// Config file (defaults to ./soupcal.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the calendar feeds over HTTP (default)
    Serve,
    /// Print the location records found on the page as JSON
    Scrape {
        /// Read page markup from this file instead of fetching it
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print one feed as ICS
    Generate {
        /// Feed to print: soup_kitchen, food_pantry or both
        #[arg(long, default_value = "both")]
        category: FeedCategory,

        /// Read page markup from this file instead of fetching it
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show every event with its upcoming occurrences
    Preview {
        /// Read page markup from this file instead of fetching it
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of occurrences to show per event
        #[arg(short = 'n', long, default_value_t = 3)]
        count: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::run(settings).await,
        Commands::Scrape { file } => commands::scrape::run(&settings, file.as_deref()).await,
        Commands::Generate { category, file } => {
            commands::generate::run(&settings, category, file.as_deref()).await
        }
        Commands::Preview { file, count } => {
            commands::preview::run(&settings, file.as_deref(), count).await
        }
    }
}
