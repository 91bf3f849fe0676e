/// Countries offered in the country pickers.
pub const SUPPORTED: [&str; 36] = [
    "Argentina",
    "Australia",
    "Austria",
    "Belgium",
    "Brazil",
    "Canada",
    "Chile",
    "China",
    "Colombia",
    "Croatia",
    "Czech Republic",
    "Denmark",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "India",
    "Ireland",
    "Italy",
    "Japan",
    "Mexico",
    "Netherlands",
    "New Zealand",
    "Norway",
    "Poland",
    "Portugal",
    "Russia",
    "Slovakia",
    "South Korea",
    "Spain",
    "Sweden",
    "Switzerland",
    "Turkey",
    "United Kingdom",
    "United States",
];

/// Canonical spelling of a supported country, matched case-insensitively.
pub fn lookup(name: &str) -> Option<&'static str> {
    let name = name.trim();
    SUPPORTED
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(name))
}

pub fn is_supported(name: &str) -> bool {
    lookup(name).is_some()
}
