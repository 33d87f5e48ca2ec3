use chrono::{Datelike, NaiveDate};

use super::model::Anniversary;

/// Next occurrence of a saved anniversary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upcoming {
    /// Position of the record in the listing (zero-based)
    pub index: usize,
    pub date: NaiveDate,
    /// Years marked on `date`
    pub years: i32,
    pub days_away: i64,
}

/// Occurrence of `original`'s month/day in `year`. Feb 29 lands on Feb 28 outside leap years.
fn occurrence_in(original: NaiveDate, year: i32) -> Option<NaiveDate> {
    original
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, original.month(), 28))
}

/// First occurrence on or after `today`. A date still in the future is its own next occurrence.
pub fn next_occurrence(original: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let from = today.max(original);
    let this_year = occurrence_in(original, from.year())?;
    if this_year >= from {
        Some(this_year)
    } else {
        occurrence_in(original, from.year() + 1)
    }
}

/// Anniversaries falling within `days` days of `today` (inclusive), soonest first.
pub fn upcoming(records: &[Anniversary], today: NaiveDate, days: i64) -> Vec<Upcoming> {
    let mut found: Vec<Upcoming> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let date = next_occurrence(record.anniversary_date, today)?;
            let days_away = (date - today).num_days();
            (days_away <= days).then(|| Upcoming {
                index,
                date,
                years: date.year() - record.anniversary_date.year(),
                days_away,
            })
        })
        .collect();

    // stable: ties keep listing order
    found.sort_by_key(|u| u.days_away);
    found
}
