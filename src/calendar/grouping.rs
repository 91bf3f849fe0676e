use serde::Serialize;

use crate::types::FullNameDay;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name days falling in one month, ordered by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    pub month: &'static str,
    pub days: Vec<FullNameDay>,
}

/// Zero-based month index from the `MM` part of `MM-DD`.
fn month_index(date: &str) -> Option<usize> {
    let month: usize = date.split('-').next()?.trim().parse().ok()?;
    month.checked_sub(1).filter(|idx| *idx < MONTH_NAMES.len())
}

/// Day of month from the part after the separator. Unparsable days sort last.
fn day_of_month(date: &str) -> u32 {
    date.split('-')
        .nth(1)
        .and_then(|day| day.trim().parse().ok())
        .unwrap_or(u32::MAX)
}

/// Bucket a full-year listing by month for the browse view.
///
/// Groups come back in calendar order and empty months are left out. Entries
/// whose month cannot be read (or is outside 1..=12) are dropped silently.
/// Within a month entries are stably sorted by ascending day.
pub fn group_by_month(entries: &[FullNameDay]) -> Vec<MonthGroup> {
    let mut buckets: [Vec<FullNameDay>; 12] = Default::default();

    for entry in entries {
        if let Some(idx) = month_index(&entry.date) {
            buckets[idx].push(entry.clone());
        }
    }

    buckets
        .into_iter()
        .enumerate()
        .filter(|(_, days)| !days.is_empty())
        .map(|(idx, mut days)| {
            days.sort_by_key(|d| day_of_month(&d.date));
            MonthGroup {
                month: MONTH_NAMES[idx],
                days,
            }
        })
        .collect()
}
