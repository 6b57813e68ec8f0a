//! Shared query infrastructure: the [`Query`] trait, [`SearchCommon`] fields,
//! and the [`OrderBy`] / [`SortOrder`] option sets.

use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. A query is an ordered list of
/// key/value parameters; encoding happens once, in [`Query::add_to_url`].
pub trait Query {
    /// Returns this query's parameters in the order they are sent.
    fn query_pairs(&self) -> Vec<(String, String)>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.query_pairs() {
                pairs.append_pair(&key, &value);
            }
        }
        url
    }
}

/// Search endpoints share ordering, filtering and paging parameters.
pub trait SearchQuery: Query {
    /// Returns a mutable reference to the common search fields.
    fn get_common(&mut self) -> &mut SearchCommon;

    /// Replaces all common search fields at once.
    fn with_common(mut self, common: SearchCommon) -> Self
    where
        Self: Sized,
    {
        *self.get_common() = common;
        self
    }

    fn with_order_by(mut self, order_by: OrderBy) -> Self
    where
        Self: Sized,
    {
        self.get_common().order_by = Some(order_by);
        self
    }

    fn with_sort_order(mut self, sort_order: SortOrder) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_order = Some(sort_order);
        self
    }

    /// Restricts results to series whose `variable` equals `value`.
    fn with_filter(mut self, variable: &str, value: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().filter = Some((variable.to_string(), value.to_string()));
        self
    }

    /// Sets the zero-based index of the first row to return.
    fn with_offset(mut self, offset: usize) -> Self
    where
        Self: Sized,
    {
        self.get_common().offset = Some(offset);
        self
    }

    /// Sets the maximum rows per response. The server caps this at 1000.
    fn with_limit(mut self, limit: usize) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }
}

/// Fields shared by all search queries. Every field is optional and omitted
/// from the URL when unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchCommon {
    pub order_by: Option<OrderBy>,
    pub sort_order: Option<SortOrder>,
    /// `(filter_variable, filter_value)`.
    pub filter: Option<(String, String)>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl SearchCommon {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(order_by) = self.order_by {
            pairs.push(("order_by".to_string(), order_by.to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sort_order".to_string(), sort_order.to_string()));
        }
        if let Some((variable, value)) = &self.filter {
            pairs.push(("filter_variable".to_string(), variable.clone()));
            pairs.push(("filter_value".to_string(), value.clone()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Result ordering accepted by the search endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderBy {
    SearchRank,
    SeriesId,
    Title,
    Units,
    Frequency,
    SeasonalAdjustment,
    RealtimeStart,
    RealtimeEnd,
    LastUpdated,
    ObservationStart,
    ObservationEnd,
    Popularity,
}

impl OrderBy {
    pub const ALL: [OrderBy; 12] = [
        OrderBy::SearchRank,
        OrderBy::SeriesId,
        OrderBy::Title,
        OrderBy::Units,
        OrderBy::Frequency,
        OrderBy::SeasonalAdjustment,
        OrderBy::RealtimeStart,
        OrderBy::RealtimeEnd,
        OrderBy::LastUpdated,
        OrderBy::ObservationStart,
        OrderBy::ObservationEnd,
        OrderBy::Popularity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::SearchRank => "search_rank",
            OrderBy::SeriesId => "series_id",
            OrderBy::Title => "title",
            OrderBy::Units => "units",
            OrderBy::Frequency => "frequency",
            OrderBy::SeasonalAdjustment => "seasonal_adjustment",
            OrderBy::RealtimeStart => "realtime_start",
            OrderBy::RealtimeEnd => "realtime_end",
            OrderBy::LastUpdated => "last_updated",
            OrderBy::ObservationStart => "observation_start",
            OrderBy::ObservationEnd => "observation_end",
            OrderBy::Popularity => "popularity",
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderBy::ALL
            .iter()
            .copied()
            .find(|option| option.as_str() == s)
            .ok_or(())
    }
}

/// Sort direction for search results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            }
        )
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}
