use anyhow::Result;
use clap::Args;
use fred_lib::Fred;

use crate::output::{print_series_info, print_vintage_dates, OutputFormat};

#[derive(Args)]
pub struct InfoArgs {
    /// Series ID (e.g. GDP, SP500, UNRATE)
    pub id: String,
}

pub async fn run(args: &InfoArgs, client: &Fred, format: &OutputFormat) -> Result<()> {
    let info = client.get_series_info(&args.id).await?;
    print_series_info(&[info], format)
}

pub async fn run_vintage_dates(args: &InfoArgs, client: &Fred, format: &OutputFormat) -> Result<()> {
    let dates = client.get_series_vintage_dates(&args.id).await?;
    eprintln!("{} vintages of {}", dates.len(), args.id);
    print_vintage_dates(&dates, format)
}
