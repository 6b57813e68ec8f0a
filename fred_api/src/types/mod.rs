mod common;
pub use self::common::{
    earliest_realtime_start, latest_realtime_end, parse_date, parse_value, DATE_FORMAT,
    EARLIEST_REALTIME_START, LATEST_REALTIME_END, MAX_RESULTS_PER_REQUEST, MISSING_VALUE,
};

mod observation;
pub use self::observation::Observation;

mod series;
pub use self::series::SeriesInfo;

mod search;
pub use self::search::SearchPage;

mod vintage;
pub use self::vintage::vintage_dates;
