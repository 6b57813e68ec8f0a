use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fred_api::{OrderBy, SortOrder};

use crate::error::FredError;

pub const MAX_SERIES_ID_LENGTH: usize = 64;
pub const MAX_SEARCH_LENGTH: usize = 200;

/// Date layouts accepted from callers, tried in order. US month-first wins
/// over day-first for slash dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a caller-supplied date in any common layout.
pub fn parse_date(input: &str) -> Result<NaiveDate, FredError> {
    let trimmed = input.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    if let Some(date) = parse_compact_date(trimmed) {
        return Ok(date);
    }
    Err(FredError::Validation(format!(
        "'{}' is not a recognizable date (try YYYY-MM-DD)",
        input
    )))
}

/// `YYYYMMDD` with no separators.
fn parse_compact_date(input: &str) -> Option<NaiveDate> {
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = input[..4].parse().ok()?;
    let month = input[4..6].parse().ok()?;
    let day = input[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>, FredError> {
    input.map(parse_date).transpose()
}

/// Strip ASCII control characters, trim whitespace, and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, FredError> {
    if input.len() > max_len {
        return Err(FredError::Validation(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(FredError::Validation(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

pub fn validate_series_id(input: &str) -> Result<String, FredError> {
    sanitize_text(input, MAX_SERIES_ID_LENGTH)
        .map_err(|e| FredError::Validation(format!("series id: {}", e)))
}

pub fn validate_search_text(input: &str) -> Result<String, FredError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

pub fn validate_order_by(input: &str) -> Result<OrderBy, FredError> {
    input.parse::<OrderBy>().map_err(|_| {
        let options: Vec<&str> = OrderBy::ALL.iter().map(OrderBy::as_str).collect();
        FredError::Validation(format!(
            "{} is not in the valid list of order_by options: {}",
            input,
            options.join(", ")
        ))
    })
}

pub fn validate_sort_order(input: &str) -> Result<SortOrder, FredError> {
    input.parse::<SortOrder>().map_err(|_| {
        FredError::Validation(format!(
            "{} is not in the valid list of sort_order options: asc, desc",
            input
        ))
    })
}

/// A filter is a `(filter_variable, filter_value)` pair with both halves present.
pub fn validate_filter(variable: &str, value: &str) -> Result<(String, String), FredError> {
    let variable = variable.trim();
    let value = value.trim();
    if variable.is_empty() || value.is_empty() {
        return Err(FredError::Validation(
            "filter should be a pair like (filter_variable, filter_value)".to_string(),
        ));
    }
    Ok((variable.to_string(), value.to_string()))
}

/// Parses the `variable=value` form into a filter pair.
pub fn parse_filter(input: &str) -> Result<(String, String), FredError> {
    let parts: Vec<&str> = input.split('=').collect();
    match parts.as_slice() {
        [variable, value] => validate_filter(variable, value),
        _ => Err(FredError::Validation(format!(
            "filter '{}' should look like filter_variable=filter_value",
            input
        ))),
    }
}

/// Parses a pass-through `key=value` query parameter. The value may contain `=`.
pub fn parse_param(input: &str) -> Result<(String, String), FredError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(FredError::Validation(format!(
            "parameter '{}' should look like key=value",
            input
        ))),
    }
}
