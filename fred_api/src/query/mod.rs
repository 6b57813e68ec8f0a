mod common;
pub use self::common::{OrderBy, Query, SearchCommon, SearchQuery, SortOrder};

mod observations;
pub use self::observations::ObservationsQuery;

mod series;
pub use self::series::{SeriesQuery, VintageDatesQuery};

mod search;
pub use self::search::{CategorySeriesQuery, ReleaseSeriesQuery, SeriesSearchQuery};
