use super::Query;

/// Parameters for `series`, the metadata lookup.
#[derive(Clone, Debug, Default)]
pub struct SeriesQuery {
    pub series_id: String,
}

impl SeriesQuery {
    pub fn new(series_id: &str) -> Self {
        Self {
            series_id: series_id.to_string(),
        }
    }
}

impl Query for SeriesQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        vec![("series_id".to_string(), self.series_id.clone())]
    }
}

/// Parameters for `series/vintagedates`.
#[derive(Clone, Debug, Default)]
pub struct VintageDatesQuery {
    pub series_id: String,
}

impl VintageDatesQuery {
    pub fn new(series_id: &str) -> Self {
        Self {
            series_id: series_id.to_string(),
        }
    }
}

impl Query for VintageDatesQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        vec![("series_id".to_string(), self.series_id.clone())]
    }
}
