mod client;
mod errors;
mod query;
pub mod types;
pub mod xml;
pub use self::client::{Client, ClientOptions, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{
    CategorySeriesQuery, ObservationsQuery, OrderBy, Query, ReleaseSeriesQuery, SearchCommon,
    SearchQuery, SeriesQuery, SeriesSearchQuery, SortOrder, VintageDatesQuery,
};
