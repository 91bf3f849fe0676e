use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A person shown in the feed, contact list or profile header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
}

/// A feed post. `timestamp` is a display label ("2 hours ago"), not a time value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: User,
    pub timestamp: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub likes: u32,
    pub comments: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDay {
    pub name: String,
}

/// What happens in one country on one date, as reported by the model.
///
/// Nothing here is cross-checked: duplicate names or wrong dates pass through
/// untouched. Only the shape is enforced when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventData {
    pub holidays: Vec<Holiday>,
    pub name_days: Vec<NameDay>,
    pub observances: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One entry of a full-year name day listing. `date` is expected as `MM-DD`
/// but is not validated on parse; grouping drops entries it cannot place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullNameDay {
    pub date: String,
    pub names: Vec<String>,
}

/// Tone requested for a generated name day wish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishStyle {
    #[default]
    Heartfelt,
    Funny,
    Formal,
    Poetic,
}

impl WishStyle {
    pub const ALL: [WishStyle; 4] = [
        WishStyle::Heartfelt,
        WishStyle::Funny,
        WishStyle::Formal,
        WishStyle::Poetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WishStyle::Heartfelt => "heartfelt",
            WishStyle::Funny => "funny",
            WishStyle::Formal => "formal",
            WishStyle::Poetic => "poetic",
        }
    }
}

impl fmt::Display for WishStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WishStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        WishStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown wish style '{}' (expected one of: heartfelt, funny, formal, poetic)",
                    s
                )
            })
    }
}
