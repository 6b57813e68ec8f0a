use serde::Serialize;

use crate::xml::XmlElement;
use crate::Error;

use super::SeriesInfo;

/// One response's worth of search results.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchPage {
    /// Total matches on the server, not the rows in this page.
    pub count: usize,
    pub offset: usize,
    pub limit: Option<usize>,
    pub series: Vec<SeriesInfo>,
}

fn count_attr(root: &XmlElement, key: &str) -> Result<Option<usize>, Error> {
    root.attr(key)
        .map(|raw| {
            raw.trim()
                .parse::<usize>()
                .map_err(|_| Error::Malformed(format!("non-numeric {} '{}'", key, raw)))
        })
        .transpose()
}

impl TryFrom<&XmlElement> for SearchPage {
    type Error = Error;

    fn try_from(root: &XmlElement) -> Result<Self, Self::Error> {
        let count = count_attr(root, "count")?.ok_or_else(|| {
            Error::Malformed(format!("<{}> is missing attribute 'count'", root.name))
        })?;
        let series = root
            .children
            .iter()
            .map(SeriesInfo::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            count,
            offset: count_attr(root, "offset")?.unwrap_or(0),
            limit: count_attr(root, "limit")?,
            series,
        })
    }
}
