//! The revision-aware FRED client.

use chrono::NaiveDate;
use fred_api::types::{Observation, SeriesInfo};
use fred_api::{
    CategorySeriesQuery, Client, ObservationsQuery, ReleaseSeriesQuery, SearchQuery,
    SeriesQuery, SeriesSearchQuery, VintageDatesQuery,
};

use crate::config::FredConfig;
use crate::error::FredError;
use crate::revisions::{self, Series};
use crate::search::{collect_pages, SearchOptions, SearchResults};
use crate::table::SeriesTable;
use crate::validation::{parse_date, parse_optional_date, validate_search_text, validate_series_id};

/// Bounds for a release-history fetch. Unset realtime bounds widen to the
/// earliest and latest dates FRED accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReleaseWindow {
    pub observation_start: Option<NaiveDate>,
    pub observation_end: Option<NaiveDate>,
    pub realtime_start: Option<NaiveDate>,
    pub realtime_end: Option<NaiveDate>,
}

impl ReleaseWindow {
    /// Parses caller-supplied bounds. Any unparsable bound is a validation error.
    pub fn from_strs(
        observation_start: Option<&str>,
        observation_end: Option<&str>,
        realtime_start: Option<&str>,
        realtime_end: Option<&str>,
    ) -> Result<Self, FredError> {
        Ok(Self {
            observation_start: parse_optional_date(observation_start)?,
            observation_end: parse_optional_date(observation_end)?,
            realtime_start: parse_optional_date(realtime_start)?,
            realtime_end: parse_optional_date(realtime_end)?,
        })
    }

    fn to_query(&self, series_id: &str) -> ObservationsQuery {
        let query = ObservationsQuery::new(series_id).with_all_vintages();
        ObservationsQuery {
            observation_start: self.observation_start,
            observation_end: self.observation_end,
            realtime_start: self.realtime_start.or(query.realtime_start),
            realtime_end: self.realtime_end.or(query.realtime_end),
            ..query
        }
    }
}

/// FRED client with credential resolution, input validation and the release
/// views over a series.
///
/// Every method issues its requests one after another and derives its result
/// fresh. Caller input is validated before anything is sent.
pub struct Fred {
    client: Client,
}

impl Fred {
    /// Resolves the API key and builds the transport. Fails with
    /// [`FredError::Configuration`] when no key is available.
    pub fn new(config: &FredConfig) -> Result<Self, FredError> {
        let api_key = config.resolve_api_key()?;
        let client = Client::with_options(config.client_options(), api_key)
            .map_err(|e| FredError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_api_key(api_key: &str) -> Result<Self, FredError> {
        Self::new(&FredConfig::with_api_key(api_key))
    }

    /// Builds a client from `FRED_API_KEY` and the other `FRED_*` variables.
    pub fn from_env() -> Result<Self, FredError> {
        Self::new(&FredConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Metadata for one series.
    pub async fn get_series_info(&self, series_id: &str) -> Result<SeriesInfo, FredError> {
        let series_id = validate_series_id(series_id)?;
        let infos = self.client.get_series(&SeriesQuery::new(&series_id)).await?;
        infos.into_iter().next().ok_or_else(|| {
            FredError::NotFound(format!("No info exists for series id: {}", series_id))
        })
    }

    /// The latest value for each date, optionally bounded by observation
    /// dates. `params` are appended to the query verbatim, in order.
    pub async fn get_series(
        &self,
        series_id: &str,
        observation_start: Option<&str>,
        observation_end: Option<&str>,
        params: &[(String, String)],
    ) -> Result<Series, FredError> {
        let query = latest_query(series_id, observation_start, observation_end, params)?;
        self.fetch_latest(&query).await
    }

    /// Same as [`Fred::get_series`] with no bounds.
    pub async fn get_series_latest_release(&self, series_id: &str) -> Result<Series, FredError> {
        self.get_series(series_id, None, None, &[]).await
    }

    /// The value each date had when first published.
    pub async fn get_series_first_release(&self, series_id: &str) -> Result<Series, FredError> {
        let rows = self.get_series_all_releases(series_id).await?;
        Ok(revisions::first_release(&rows))
    }

    /// Every revision published on or before `as_of_date`. Dates revised
    /// several times by then appear once per revision.
    pub async fn get_series_as_of_date(
        &self,
        series_id: &str,
        as_of_date: &str,
    ) -> Result<Vec<Observation>, FredError> {
        let as_of = parse_date(as_of_date)?;
        let rows = self.get_series_all_releases(series_id).await?;
        Ok(revisions::as_of(rows, as_of))
    }

    /// Every revision of every date, in server order.
    pub async fn get_series_all_releases(
        &self,
        series_id: &str,
    ) -> Result<Vec<Observation>, FredError> {
        self.get_series_releases(series_id, &ReleaseWindow::default())
            .await
    }

    /// Revision history restricted to `window`.
    pub async fn get_series_releases(
        &self,
        series_id: &str,
        window: &ReleaseWindow,
    ) -> Result<Vec<Observation>, FredError> {
        let series_id = validate_series_id(series_id)?;
        let rows = self
            .client
            .get_observations(&window.to_query(&series_id))
            .await?;
        if rows.is_empty() {
            return Err(no_data(&series_id));
        }
        tracing::debug!(series_id = %series_id, rows = rows.len(), "Fetched release history");
        Ok(rows)
    }

    /// Dates on which the series was revised or extended, ascending.
    pub async fn get_series_vintage_dates(
        &self,
        series_id: &str,
    ) -> Result<Vec<NaiveDate>, FredError> {
        let series_id = validate_series_id(series_id)?;
        let dates = self
            .client
            .get_vintage_dates(&VintageDatesQuery::new(&series_id))
            .await?;
        Ok(dates)
    }

    /// Latest values of several series joined on date. Every id and bound is
    /// checked before the first request; any failing series fails the call.
    pub async fn get_series_table(
        &self,
        series_ids: &[&str],
        observation_start: Option<&str>,
        observation_end: Option<&str>,
        params: &[(String, String)],
    ) -> Result<SeriesTable, FredError> {
        if series_ids.is_empty() {
            return Err(FredError::Validation(
                "at least one series id is required".to_string(),
            ));
        }
        let queries = series_ids
            .iter()
            .map(|id| latest_query(id, observation_start, observation_end, params))
            .collect::<Result<Vec<_>, _>>()?;

        let mut columns = Vec::with_capacity(queries.len());
        for query in &queries {
            let series = self.fetch_latest(query).await?;
            columns.push((query.series_id.clone(), series));
        }
        Ok(SeriesTable::from_series(columns))
    }

    /// Full-text search over series titles and notes. No match is an empty
    /// result, not an error.
    pub async fn search(
        &self,
        text: &str,
        options: &SearchOptions,
    ) -> Result<SearchResults, FredError> {
        let text = validate_search_text(text)?;
        let base = SeriesSearchQuery::new(&text).with_common(options.to_common()?);
        collect_pages(options.limit, |offset| {
            let query = at_offset(&base, offset);
            async move { self.client.search_series(&query).await.map_err(FredError::from) }
        })
        .await
    }

    /// Series published in a release. An empty release is [`FredError::NotFound`].
    pub async fn search_by_release(
        &self,
        release_id: u32,
        options: &SearchOptions,
    ) -> Result<SearchResults, FredError> {
        let base = ReleaseSeriesQuery::new(release_id).with_common(options.to_common()?);
        let results = collect_pages(options.limit, |offset| {
            let query = at_offset(&base, offset);
            async move { self.client.get_release_series(&query).await.map_err(FredError::from) }
        })
        .await?;
        if results.is_empty() {
            return Err(FredError::NotFound(format!(
                "No series exists for release id: {}",
                release_id
            )));
        }
        Ok(results)
    }

    /// Series filed under a category. An empty category is [`FredError::NotFound`].
    pub async fn search_by_category(
        &self,
        category_id: u32,
        options: &SearchOptions,
    ) -> Result<SearchResults, FredError> {
        let base = CategorySeriesQuery::new(category_id).with_common(options.to_common()?);
        let results = collect_pages(options.limit, |offset| {
            let query = at_offset(&base, offset);
            async move { self.client.get_category_series(&query).await.map_err(FredError::from) }
        })
        .await?;
        if results.is_empty() {
            return Err(FredError::NotFound(format!(
                "No series exists for category id: {}",
                category_id
            )));
        }
        Ok(results)
    }

    async fn fetch_latest(&self, query: &ObservationsQuery) -> Result<Series, FredError> {
        let rows = self.client.get_observations(query).await?;
        if rows.is_empty() {
            return Err(no_data(&query.series_id));
        }
        Ok(revisions::to_series(&rows))
    }
}

fn latest_query(
    series_id: &str,
    observation_start: Option<&str>,
    observation_end: Option<&str>,
    params: &[(String, String)],
) -> Result<ObservationsQuery, FredError> {
    let series_id = validate_series_id(series_id)?;
    Ok(ObservationsQuery {
        series_id,
        observation_start: parse_optional_date(observation_start)?,
        observation_end: parse_optional_date(observation_end)?,
        realtime_start: None,
        realtime_end: None,
        extra: params.to_vec(),
    })
}

/// The first page is requested without an `offset` parameter.
fn at_offset<Q: SearchQuery + Clone>(base: &Q, offset: usize) -> Q {
    let query = base.clone();
    if offset > 0 {
        query.with_offset(offset)
    } else {
        query
    }
}

fn no_data(series_id: &str) -> FredError {
    FredError::NotFound(format!("No data exists for series id: {}", series_id))
}
