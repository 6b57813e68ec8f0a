//! Revision-aware access to FRED economic time series.
//!
//! Wraps the `fred_api` transport with credential resolution, input
//! validation, the four release views over a series (latest, first release,
//! as-of-date, all releases) and search aggregation across server pages.

pub mod client;
pub mod config;
pub mod error;
pub mod revisions;
pub mod search;
pub mod table;
pub mod validation;

pub use fred_api;
pub use fred_api::types;
pub use fred_api::types::{Observation, SeriesInfo};
pub use fred_api::{OrderBy, SortOrder};

pub use client::{Fred, ReleaseWindow};
pub use config::FredConfig;
pub use error::FredError;
pub use revisions::Series;
pub use search::{SearchOptions, SearchResults};
pub use table::SeriesTable;
