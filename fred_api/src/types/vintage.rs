use chrono::NaiveDate;

use crate::xml::XmlElement;
use crate::Error;

use super::common::parse_date;

/// Decodes the text of each `<vintage_date>` child of a `<vintage_dates>` root.
pub fn vintage_dates(root: &XmlElement) -> Result<Vec<NaiveDate>, Error> {
    root.children
        .iter()
        .map(|child| {
            let text = child.text.as_deref().ok_or_else(|| {
                Error::Malformed(format!("<{}> has no text content", child.name))
            })?;
            parse_date(text)
        })
        .collect()
}
