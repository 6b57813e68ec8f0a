use chrono::NaiveDate;

use crate::types::{earliest_realtime_start, latest_realtime_end, DATE_FORMAT};

use super::Query;

/// Parameters for `series/observations`.
///
/// Without a realtime window FRED returns the values current today, one row
/// per date. With [`ObservationsQuery::with_all_vintages`] it returns every
/// revision ever published.
#[derive(Clone, Debug, Default)]
pub struct ObservationsQuery {
    pub series_id: String,
    pub observation_start: Option<NaiveDate>,
    pub observation_end: Option<NaiveDate>,
    pub realtime_start: Option<NaiveDate>,
    pub realtime_end: Option<NaiveDate>,
    /// Passed through verbatim after the typed parameters.
    pub extra: Vec<(String, String)>,
}

impl Query for ObservationsQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("series_id".to_string(), self.series_id.clone())];
        let dates = [
            ("observation_start", self.observation_start),
            ("observation_end", self.observation_end),
            ("realtime_start", self.realtime_start),
            ("realtime_end", self.realtime_end),
        ];
        for (key, date) in dates {
            if let Some(date) = date {
                pairs.push((key.to_string(), date.format(DATE_FORMAT).to_string()));
            }
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

impl ObservationsQuery {
    pub fn new(series_id: &str) -> Self {
        Self {
            series_id: series_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_observation_start(mut self, date: NaiveDate) -> Self {
        self.observation_start = Some(date);
        self
    }

    pub fn with_observation_end(mut self, date: NaiveDate) -> Self {
        self.observation_end = Some(date);
        self
    }

    pub fn with_realtime_start(mut self, date: NaiveDate) -> Self {
        self.realtime_start = Some(date);
        self
    }

    pub fn with_realtime_end(mut self, date: NaiveDate) -> Self {
        self.realtime_end = Some(date);
        self
    }

    /// Widens the realtime window to the earliest and latest dates FRED accepts.
    pub fn with_all_vintages(self) -> Self {
        self.with_realtime_start(earliest_realtime_start())
            .with_realtime_end(latest_realtime_end())
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.extra.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_params(mut self, params: &[(String, String)]) -> Self {
        self.extra.extend_from_slice(params);
        self
    }
}
