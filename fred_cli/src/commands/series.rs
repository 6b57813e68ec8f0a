use anyhow::Result;
use clap::Args;
use fred_lib::validation::parse_param;
use fred_lib::{Fred, ReleaseWindow};

use crate::output::{print_revisions, print_series, OutputFormat};

#[derive(Args)]
pub struct SeriesArgs {
    /// Series ID (e.g. GDP, SP500, UNRATE)
    pub id: String,

    /// First observation date (YYYY-MM-DD, 9/2/2014, Sep 2, 2014, ...)
    #[arg(long)]
    pub start: Option<String>,

    /// Last observation date
    #[arg(long)]
    pub end: Option<String>,

    /// Extra query parameter as key=value, e.g. units=pch (repeatable)
    #[arg(long = "param")]
    pub params: Vec<String>,
}

#[derive(Args)]
pub struct FirstReleaseArgs {
    /// Series ID
    pub id: String,
}

#[derive(Args)]
pub struct AsOfArgs {
    /// Series ID
    pub id: String,

    /// Show only revisions published on or before this date
    pub date: String,
}

#[derive(Args)]
pub struct ReleasesArgs {
    /// Series ID
    pub id: String,

    /// First observation date
    #[arg(long)]
    pub start: Option<String>,

    /// Last observation date
    #[arg(long)]
    pub end: Option<String>,

    /// Earliest publication date (defaults to 1776-07-04)
    #[arg(long)]
    pub realtime_start: Option<String>,

    /// Latest publication date (defaults to 9999-12-31)
    #[arg(long)]
    pub realtime_end: Option<String>,
}

pub async fn run(args: &SeriesArgs, client: &Fred, format: &OutputFormat) -> Result<()> {
    let params = args
        .params
        .iter()
        .map(|p| parse_param(p))
        .collect::<Result<Vec<_>, _>>()?;

    let series = client
        .get_series(&args.id, args.start.as_deref(), args.end.as_deref(), &params)
        .await?;

    eprintln!("{} observations of {}", series.len(), args.id);
    print_series(&series, format)
}

pub async fn run_first_release(
    args: &FirstReleaseArgs,
    client: &Fred,
    format: &OutputFormat,
) -> Result<()> {
    let series = client.get_series_first_release(&args.id).await?;
    eprintln!("{} first-release observations of {}", series.len(), args.id);
    print_series(&series, format)
}

pub async fn run_as_of(args: &AsOfArgs, client: &Fred, format: &OutputFormat) -> Result<()> {
    let rows = client.get_series_as_of_date(&args.id, &args.date).await?;
    eprintln!("{} revisions of {} as of {}", rows.len(), args.id, args.date);
    print_revisions(&rows, format)
}

pub async fn run_releases(args: &ReleasesArgs, client: &Fred, format: &OutputFormat) -> Result<()> {
    let window = ReleaseWindow::from_strs(
        args.start.as_deref(),
        args.end.as_deref(),
        args.realtime_start.as_deref(),
        args.realtime_end.as_deref(),
    )?;
    let rows = client.get_series_releases(&args.id, &window).await?;
    eprintln!("{} revisions of {}", rows.len(), args.id);
    print_revisions(&rows, format)
}
