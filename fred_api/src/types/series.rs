use chrono::NaiveDate;
use serde::Serialize;

use crate::xml::XmlElement;
use crate::Error;

use super::common::parse_date;

/// Descriptive metadata for one series, as returned by `series` and the
/// search endpoints.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SeriesInfo {
    pub id: String,
    pub realtime_start: NaiveDate,
    pub realtime_end: NaiveDate,
    pub title: String,
    pub observation_start: NaiveDate,
    pub observation_end: NaiveDate,
    pub frequency: String,
    pub frequency_short: String,
    pub units: String,
    pub units_short: String,
    pub seasonal_adjustment: String,
    pub seasonal_adjustment_short: String,
    /// Reported as-is, e.g. `2015-07-17 17:24:36-05`.
    pub last_updated: String,
    pub popularity: i64,
    pub notes: Option<String>,
}

impl TryFrom<&XmlElement> for SeriesInfo {
    type Error = Error;

    fn try_from(element: &XmlElement) -> Result<Self, Self::Error> {
        let text = |key: &str| element.required_attr(key).map(str::to_string);
        let date = |key: &str| element.required_attr(key).and_then(parse_date);

        let popularity = element.required_attr("popularity")?;
        let popularity = popularity.trim().parse::<i64>().map_err(|_| {
            Error::Malformed(format!("non-numeric popularity '{}'", popularity))
        })?;

        Ok(Self {
            id: text("id")?,
            realtime_start: date("realtime_start")?,
            realtime_end: date("realtime_end")?,
            title: text("title")?,
            observation_start: date("observation_start")?,
            observation_end: date("observation_end")?,
            frequency: text("frequency")?,
            frequency_short: text("frequency_short")?,
            units: text("units")?,
            units_short: text("units_short")?,
            seasonal_adjustment: text("seasonal_adjustment")?,
            seasonal_adjustment_short: text("seasonal_adjustment_short")?,
            last_updated: text("last_updated")?,
            popularity,
            notes: element.attr("notes").map(str::to_string),
        })
    }
}
