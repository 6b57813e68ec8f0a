use super::{Query, SearchCommon, SearchQuery};

/// Full-text search over series titles and notes (`series/search`).
#[derive(Clone, Debug, Default)]
pub struct SeriesSearchQuery {
    pub common: SearchCommon,
    pub search_text: String,
}

impl SeriesSearchQuery {
    pub fn new(search_text: &str) -> Self {
        Self {
            common: SearchCommon::default(),
            search_text: search_text.to_string(),
        }
    }
}

impl Query for SeriesSearchQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("search_text".to_string(), self.search_text.clone())];
        pairs.extend(self.common.query_pairs());
        pairs
    }
}

impl SearchQuery for SeriesSearchQuery {
    fn get_common(&mut self) -> &mut SearchCommon {
        &mut self.common
    }
}

/// Series belonging to one release (`release/series`).
#[derive(Clone, Debug, Default)]
pub struct ReleaseSeriesQuery {
    pub common: SearchCommon,
    pub release_id: u32,
}

impl ReleaseSeriesQuery {
    pub fn new(release_id: u32) -> Self {
        Self {
            common: SearchCommon::default(),
            release_id,
        }
    }
}

impl Query for ReleaseSeriesQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("release_id".to_string(), self.release_id.to_string())];
        pairs.extend(self.common.query_pairs());
        pairs
    }
}

impl SearchQuery for ReleaseSeriesQuery {
    fn get_common(&mut self) -> &mut SearchCommon {
        &mut self.common
    }
}

/// Series filed under one category (`category/series`).
#[derive(Clone, Debug, Default)]
pub struct CategorySeriesQuery {
    pub common: SearchCommon,
    pub category_id: u32,
}

impl CategorySeriesQuery {
    pub fn new(category_id: u32) -> Self {
        Self {
            common: SearchCommon::default(),
            category_id,
        }
    }
}

impl Query for CategorySeriesQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("category_id".to_string(), self.category_id.to_string())];
        pairs.extend(self.common.query_pairs());
        pairs
    }
}

impl SearchQuery for CategorySeriesQuery {
    fn get_common(&mut self) -> &mut SearchCommon {
        &mut self.common
    }
}
