use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::revisions::Series;

/// Several series outer-joined on observation date.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    /// Series ids, in the order they were requested.
    pub columns: Vec<String>,
    /// One value per column for every date seen in any series.
    pub rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
}

impl SeriesTable {
    /// Joins `(id, series)` pairs. A date missing from a series is `None` in
    /// that column.
    pub fn from_series(series: Vec<(String, Series)>) -> Self {
        let width = series.len();
        let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
        let mut columns = Vec::with_capacity(width);
        for (index, (id, values)) in series.into_iter().enumerate() {
            columns.push(id);
            for (date, value) in values {
                rows.entry(date).or_insert_with(|| vec![None; width])[index] = value;
            }
        }
        Self { columns, rows }
    }

    /// The value of `column` on `date`, if both exist and the value is present.
    pub fn get(&self, date: NaiveDate, column: &str) -> Option<f64> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(&date)?.get(index).copied().flatten()
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
