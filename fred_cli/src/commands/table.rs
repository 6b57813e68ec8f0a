use anyhow::Result;
use clap::Args;
use fred_lib::validation::parse_param;
use fred_lib::Fred;

use crate::output::{print_series_table, OutputFormat};

#[derive(Args)]
pub struct TableArgs {
    /// Series IDs to join on date, in column order
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// First observation date
    #[arg(long)]
    pub start: Option<String>,

    /// Last observation date
    #[arg(long)]
    pub end: Option<String>,

    /// Extra query parameter sent with every series, as key=value (repeatable)
    #[arg(long = "param")]
    pub params: Vec<String>,
}

pub async fn run(args: &TableArgs, client: &Fred, format: &OutputFormat) -> Result<()> {
    let params = args
        .params
        .iter()
        .map(|p| parse_param(p))
        .collect::<Result<Vec<_>, _>>()?;
    let ids: Vec<&str> = args.ids.iter().map(String::as_str).collect();

    let table = client
        .get_series_table(&ids, args.start.as_deref(), args.end.as_deref(), &params)
        .await?;

    eprintln!("{} dates across {} series", table.len(), table.columns.len());
    print_series_table(&table, format)
}
