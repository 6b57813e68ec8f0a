//! Search aggregation across server-truncated pages.
//!
//! FRED returns at most [`MAX_RESULTS_PER_REQUEST`] rows per search request.
//! [`collect_pages`] keeps requesting successive offsets until the caller's
//! limit, or the total count reported by the first page, is met.

use std::future::Future;

use fred_api::types::{SearchPage, SeriesInfo, MAX_RESULTS_PER_REQUEST};
use fred_api::SearchCommon;
use serde::Serialize;

use crate::error::FredError;
use crate::validation::{validate_filter, validate_order_by, validate_sort_order};

/// Caller-facing search parameters. String options are checked against the
/// accepted sets before any request is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum rows to return. `0` returns every match.
    pub limit: usize,
    pub order_by: Option<String>,
    pub sort_order: Option<String>,
    /// `(filter_variable, filter_value)`, e.g. `("frequency", "Monthly")`.
    pub filter: Option<(String, String)>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: MAX_RESULTS_PER_REQUEST,
            order_by: None,
            sort_order: None,
            filter: None,
        }
    }
}

impl SearchOptions {
    /// Options that fetch every match.
    pub fn all() -> Self {
        Self {
            limit: 0,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_order_by(mut self, order_by: &str) -> Self {
        self.order_by = Some(order_by.to_string());
        self
    }

    pub fn with_sort_order(mut self, sort_order: &str) -> Self {
        self.sort_order = Some(sort_order.to_string());
        self
    }

    pub fn with_filter(mut self, variable: &str, value: &str) -> Self {
        self.filter = Some((variable.to_string(), value.to_string()));
        self
    }

    /// Validates the options into the parameters shared by every page request.
    pub fn to_common(&self) -> Result<SearchCommon, FredError> {
        let order_by = self.order_by.as_deref().map(validate_order_by).transpose()?;
        let sort_order = self
            .sort_order
            .as_deref()
            .map(validate_sort_order)
            .transpose()?;
        let filter = self
            .filter
            .as_ref()
            .map(|(variable, value)| validate_filter(variable, value))
            .transpose()?;
        // A small limit fits in one page, so ask the server for just that many.
        let limit = (self.limit > 0 && self.limit < MAX_RESULTS_PER_REQUEST).then_some(self.limit);
        Ok(SearchCommon {
            order_by,
            sort_order,
            filter,
            offset: None,
            limit,
        })
    }
}

/// The concatenated rows of one logical search.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// Total matches reported by the first page.
    pub total_count: usize,
    pub series: Vec<SeriesInfo>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Requests pages at offsets `0, 1000, 2000, ...` until enough rows are held.
///
/// The row target is `count` from the first page when `limit` is 0, otherwise
/// the smaller of `limit` and `count`. Pages are concatenated in request order
/// and truncated to the target. A page with no rows ends paging early. Any
/// failing page aborts the whole search.
pub async fn collect_pages<F, Fut>(limit: usize, mut fetch_page: F) -> Result<SearchResults, FredError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<SearchPage, FredError>>,
{
    let first = fetch_page(0).await?;
    let total_count = first.count;
    let mut series = first.series;
    if series.is_empty() {
        return Ok(SearchResults {
            total_count,
            series,
        });
    }

    let needed = if limit == 0 {
        total_count
    } else {
        limit.min(total_count)
    };

    let mut page_index = 1;
    while series.len() < needed {
        let offset = page_index * MAX_RESULTS_PER_REQUEST;
        tracing::debug!(offset, needed, held = series.len(), "Fetching next search page");
        let page = fetch_page(offset).await?;
        if page.series.is_empty() {
            tracing::warn!(
                offset,
                needed,
                held = series.len(),
                "Search page came back empty before the reported count was reached"
            );
            break;
        }
        series.extend(page.series);
        page_index += 1;
    }

    series.truncate(needed);
    Ok(SearchResults {
        total_count,
        series,
    })
}
