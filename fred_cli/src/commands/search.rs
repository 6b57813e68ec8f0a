use anyhow::Result;
use clap::Args;
use fred_lib::validation::parse_filter;
use fred_lib::{Fred, SearchOptions};

use crate::output::{print_series_info, OutputFormat};

/// Row cap for text search when `--limit` is not given.
const DEFAULT_TEXT_LIMIT: usize = 1000;

#[derive(Args)]
pub struct SearchArgs {
    /// Words to match against series titles and notes
    #[arg(required_unless_present_any = ["release", "category"])]
    pub text: Option<String>,

    /// List the series of a release instead of searching text
    #[arg(long, conflicts_with_all = ["text", "category"])]
    pub release: Option<u32>,

    /// List the series of a category instead of searching text
    #[arg(long, conflicts_with = "text")]
    pub category: Option<u32>,

    /// Maximum rows, 0 for every match. Defaults to 1000 for text search and
    /// to every match for --release and --category
    #[arg(long)]
    pub limit: Option<usize>,

    /// Sort field: search_rank, series_id, title, units, frequency,
    /// seasonal_adjustment, realtime_start, realtime_end, last_updated,
    /// observation_start, observation_end, popularity
    #[arg(long)]
    pub order_by: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    pub sort_order: Option<String>,

    /// Keep only series where variable=value, e.g. frequency=Monthly
    #[arg(long)]
    pub filter: Option<String>,
}

impl SearchArgs {
    fn to_options(&self) -> Result<SearchOptions> {
        let default_limit = if self.text.is_some() {
            DEFAULT_TEXT_LIMIT
        } else {
            0
        };
        let mut options = SearchOptions::default().with_limit(self.limit.unwrap_or(default_limit));
        if let Some(order_by) = &self.order_by {
            options = options.with_order_by(order_by);
        }
        if let Some(sort_order) = &self.sort_order {
            options = options.with_sort_order(sort_order);
        }
        if let Some(filter) = &self.filter {
            let (variable, value) = parse_filter(filter)?;
            options = options.with_filter(&variable, &value);
        }
        Ok(options)
    }
}

pub async fn run(args: &SearchArgs, client: &Fred, format: &OutputFormat) -> Result<()> {
    let options = args.to_options()?;

    let results = match (args.release, args.category, &args.text) {
        (Some(release_id), _, _) => client.search_by_release(release_id, &options).await?,
        (None, Some(category_id), _) => client.search_by_category(category_id, &options).await?,
        (None, None, Some(text)) => client.search(text, &options).await?,
        (None, None, None) => anyhow::bail!("give search text, --release or --category"),
    };

    eprintln!(
        "{} of {} matching series",
        results.len(),
        results.total_count
    );
    print_series_info(&results.series, format)
}
