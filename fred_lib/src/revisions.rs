//! Reductions over revision history.
//!
//! Every release-aware view is computed here from one full-history fetch, so
//! the views cannot disagree about what a revision is. Inputs are rows in
//! server order: observation date major, `realtime_start` minor.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use fred_api::types::Observation;

/// Date → value, one entry per observation date. `None` is a missing value.
pub type Series = BTreeMap<NaiveDate, Option<f64>>;

/// Collapses rows that are already one per date (the default observations
/// endpoint). A repeated date keeps its last row.
pub fn to_series(observations: &[Observation]) -> Series {
    observations.iter().map(|o| (o.date, o.value)).collect()
}

/// Keeps, for each date, the row with the earliest `realtime_start`.
/// Equal starts keep the row seen first.
pub fn first_release(observations: &[Observation]) -> Series {
    reduce_by_date(observations, |candidate, kept| {
        candidate.realtime_start < kept.realtime_start
    })
}

/// Keeps, for each date, the row with the latest `realtime_start`.
/// Equal starts keep the row seen last.
pub fn latest_release(observations: &[Observation]) -> Series {
    reduce_by_date(observations, |candidate, kept| {
        candidate.realtime_start >= kept.realtime_start
    })
}

/// Every row already published on `as_of`. A date revised more than once by
/// then appears once per revision.
pub fn as_of(observations: Vec<Observation>, as_of: NaiveDate) -> Vec<Observation> {
    observations
        .into_iter()
        .filter(|o| o.realtime_start <= as_of)
        .collect()
}

fn reduce_by_date<F>(observations: &[Observation], replaces: F) -> Series
where
    F: Fn(&Observation, &Observation) -> bool,
{
    let mut kept: BTreeMap<NaiveDate, &Observation> = BTreeMap::new();
    for observation in observations {
        match kept.entry(observation.date) {
            Entry::Vacant(slot) => {
                slot.insert(observation);
            }
            Entry::Occupied(mut slot) => {
                if replaces(observation, slot.get()) {
                    slot.insert(observation);
                }
            }
        }
    }
    kept.into_iter().map(|(date, o)| (date, o.value)).collect()
}
