//! Text rendering for the CLI. Each function returns the full block so the
//! caller decides where it goes.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::calendar::{prompts::display_date, MonthGroup};
use crate::types::{CalendarEventData, WishStyle};

pub fn daily_events(country: &str, date: NaiveDate, data: &CalendarEventData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} on {}", country, display_date(date));

    out.push_str("\nPublic holidays\n");
    if data.holidays.is_empty() {
        out.push_str("  No public holidays today.\n");
    }
    for holiday in &data.holidays {
        let _ = writeln!(out, "  * {}: {}", holiday.name, holiday.description);
    }

    out.push_str("\nName days\n");
    if data.name_days.is_empty() {
        out.push_str("  No name days listed.\n");
    } else {
        let names: Vec<&str> = data.name_days.iter().map(|n| n.name.as_str()).collect();
        let _ = writeln!(out, "  {}", names.join(", "));
    }

    out.push_str("\nObservances\n");
    if data.observances.is_empty() {
        out.push_str("  No special observances.\n");
    }
    for observance in &data.observances {
        let _ = writeln!(out, "  * {}", observance);
    }

    if let Some(notes) = data.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(out, "\nNote: {}", notes.trim());
    }
    out
}

pub fn name_day_browser(country: &str, groups: &[MonthGroup]) -> String {
    if groups.is_empty() {
        return format!(
            "No name day data found for {}. This country may not have a name day tradition.\n",
            country
        );
    }

    let mut out = String::new();
    let _ = writeln!(out, "Name days in {}", country);
    for group in groups {
        let _ = writeln!(out, "\n{}", group.month);
        for day in &group.days {
            let _ = writeln!(out, "  {:<6} {}", day_month(&day.date), day.names.join(", "));
        }
    }
    out
}

pub fn wish(name: &str, style: WishStyle, text: &str) -> String {
    format!("{} wish for {}:\n\n{}\n", capitalize(style.as_str()), name, text)
}

pub fn countries(list: &[&str]) -> String {
    let mut out = String::new();
    for country in list {
        out.push_str(country);
        out.push('\n');
    }
    out
}

/// `MM-DD` as `DD.MM.`; anything else is shown as given.
fn day_month(date: &str) -> String {
    match date.split_once('-') {
        Some((month, day)) => format!("{}.{}.", day, month),
        None => date.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
