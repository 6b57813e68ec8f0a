mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fred_lib::{Fred, FredConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "fred")]
#[command(about = "Query economic time series and their revision history from FRED")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// TOML config file (api_key, api_key_file, base_url, proxy, timeout_secs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// FRED API key. Overrides the config file and FRED_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// File whose first line is the FRED API key
    #[arg(long, global = true)]
    api_key_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest value of each observation
    Series(commands::series::SeriesArgs),
    /// Value of each observation when first published
    FirstRelease(commands::series::FirstReleaseArgs),
    /// Every revision published on or before a date
    AsOf(commands::series::AsOfArgs),
    /// Full revision history
    Releases(commands::series::ReleasesArgs),
    /// Series metadata
    Info(commands::info::InfoArgs),
    /// Dates on which a series was revised or extended
    VintageDates(commands::info::InfoArgs),
    /// Search series by text, release or category
    Search(commands::search::SearchArgs),
    /// Several series joined on date
    Table(commands::table::TableArgs),
}

impl Cli {
    fn config(&self) -> Result<FredConfig> {
        let mut config = match &self.config {
            Some(path) => FredConfig::load(path)?,
            None => FredConfig::default(),
        };
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(path) = &self.api_key_file {
            config.api_key_file = Some(path.clone());
        }
        Ok(config.with_env_defaults())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fred=info".parse::<tracing_subscriber::filter::Directive>()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_name(&cli.output);

    let config = cli.config()?;
    tracing::debug!(base_url = ?config.base_url, proxy = ?config.proxy, "Resolved configuration");
    let client = Fred::new(&config)?;

    match &cli.command {
        Commands::Series(args) => commands::series::run(args, &client, &format).await?,
        Commands::FirstRelease(args) => {
            commands::series::run_first_release(args, &client, &format).await?
        }
        Commands::AsOf(args) => commands::series::run_as_of(args, &client, &format).await?,
        Commands::Releases(args) => commands::series::run_releases(args, &client, &format).await?,
        Commands::Info(args) => commands::info::run(args, &client, &format).await?,
        Commands::VintageDates(args) => {
            commands::info::run_vintage_dates(args, &client, &format).await?
        }
        Commands::Search(args) => commands::search::run(args, &client, &format).await?,
        Commands::Table(args) => commands::table::run(args, &client, &format).await?,
    }

    Ok(())
}
