//! Wire constants and scalar decoders shared by every record type.

use chrono::NaiveDate;

use crate::Error;

/// Date format used on the wire, both in query parameters and attributes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest `realtime_start` FRED accepts. Pinning it returns every vintage.
pub const EARLIEST_REALTIME_START: &str = "1776-07-04";

/// Latest `realtime_end` FRED accepts. As an attribute it marks a still-current row.
pub const LATEST_REALTIME_END: &str = "9999-12-31";

/// Literal FRED reports in place of a value when no data exists.
pub const MISSING_VALUE: &str = ".";

/// Server-side cap on rows returned by one search request.
pub const MAX_RESULTS_PER_REQUEST: usize = 1000;

pub fn earliest_realtime_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1776, 7, 4).unwrap_or(NaiveDate::MIN)
}

pub fn latest_realtime_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Decodes a `YYYY-MM-DD` attribute.
pub fn parse_date(raw: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| Error::Malformed(format!("invalid date '{}': {}", raw, e)))
}

/// Decodes an observation value. `None` is the missing-data marker, not zero.
pub fn parse_value(raw: &str) -> Result<Option<f64>, Error> {
    let raw = raw.trim();
    if raw == MISSING_VALUE {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(Error::Malformed(format!("non-numeric value '{}'", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_marker_is_none() {
        assert_eq!(parse_value(".").unwrap(), None);
    }

    #[test]
    fn zero_is_a_value() {
        assert_eq!(parse_value("0").unwrap(), Some(0.0));
        assert_eq!(parse_value("17599.8").unwrap(), Some(17599.8));
    }

    #[test]
    fn other_tokens_are_malformed() {
        for raw in ["", "NaN", "n/a", "inf", "1,234"] {
            assert!(parse_value(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn sentinels_round_trip_through_the_wire_format() {
        assert_eq!(
            earliest_realtime_start().format(DATE_FORMAT).to_string(),
            EARLIEST_REALTIME_START
        );
        assert_eq!(
            latest_realtime_end().format(DATE_FORMAT).to_string(),
            LATEST_REALTIME_END
        );
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("2014-09-02").is_ok());
        assert!(parse_date("9/2/2014").is_err());
    }
}
