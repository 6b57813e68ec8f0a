use chrono::NaiveDate;
use serde::Serialize;

use crate::xml::XmlElement;
use crate::Error;

use super::common::{parse_date, parse_value, LATEST_REALTIME_END};

/// One revision of one data point.
///
/// `realtime_start..=realtime_end` is the window during which `value` was the
/// published figure for `date`. `realtime_end` is `None` while the row is
/// still current.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub realtime_start: NaiveDate,
    pub realtime_end: Option<NaiveDate>,
    pub value: Option<f64>,
}

impl Observation {
    pub fn is_current(&self) -> bool {
        self.realtime_end.is_none()
    }

    /// Decodes every child of an `<observations>` root, in response order.
    pub fn from_document(root: &XmlElement) -> Result<Vec<Self>, Error> {
        root.children.iter().map(Observation::try_from).collect()
    }
}

impl TryFrom<&XmlElement> for Observation {
    type Error = Error;

    fn try_from(element: &XmlElement) -> Result<Self, Self::Error> {
        let realtime_end = match element.required_attr("realtime_end")? {
            raw if raw.trim() == LATEST_REALTIME_END => None,
            raw => Some(parse_date(raw)?),
        };
        Ok(Self {
            date: parse_date(element.required_attr("date")?)?,
            realtime_start: parse_date(element.required_attr("realtime_start")?)?,
            realtime_end,
            value: parse_value(element.required_attr("value")?)?,
        })
    }
}

