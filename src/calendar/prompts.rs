//! Prompt text and response schemas for the three calendar requests.
//!
//! Schemas use the Gemini `Type` vocabulary (`OBJECT`, `ARRAY`, `STRING`).

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::types::WishStyle;

pub fn daily_events(country: &str, date: NaiveDate) -> String {
    format!(
        "For {} on {}, please provide a list of public holidays, important observances, \
         and any celebrated name days (in Czech: 'jmeniny' or 'svátek'). \
         If the country does not celebrate name days, please state that in the notes.",
        country,
        display_date(date)
    )
}

pub fn all_name_days(country: &str) -> String {
    format!(
        "Please provide a complete list of all name days celebrated in {}. \
         Structure the response as an array of objects, where each object contains a 'date' \
         (in MM-DD format) and an array of 'names' for that date. \
         If the country does not celebrate name days, return an empty array.",
        country
    )
}

pub fn wish(name: &str, country: &str, style: WishStyle) -> String {
    format!(
        "Write a {} name day wish for a person named {}. The celebration is in {}. \
         Keep the wish concise, warm, and under 50 words. \
         Write it in the local language of the country.",
        style, name, country
    )
}

/// "September 2, 2025"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn daily_events_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "holidays": {
                "type": "ARRAY",
                "description": "A list of official public holidays.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "The official name of the holiday." },
                        "description": { "type": "STRING", "description": "A brief description of the holiday." }
                    },
                    "required": ["name", "description"]
                }
            },
            "nameDays": {
                "type": "ARRAY",
                "description": "A list of common name days celebrated. In Czech, this is 'jmeniny' or 'svátek'.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "The name being celebrated." }
                    },
                    "required": ["name"]
                }
            },
            "observances": {
                "type": "ARRAY",
                "description": "Other non-holiday observances or notable events.",
                "items": { "type": "STRING" }
            },
            "notes": {
                "type": "STRING",
                "description": "Any additional notes, for example if the country does not celebrate name days."
            }
        },
        "required": ["holidays", "nameDays", "observances"]
    })
}

pub fn all_name_days_schema() -> Value {
    json!({
        "type": "ARRAY",
        "description": "A complete list of name days for the specified country.",
        "items": {
            "type": "OBJECT",
            "properties": {
                "date": { "type": "STRING", "description": "The date in MM-DD format." },
                "names": {
                    "type": "ARRAY",
                    "description": "An array of names celebrated on this date.",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["date", "names"]
        }
    })
}
