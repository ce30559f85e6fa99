use regex::Regex;
use std::sync::LazyLock;

/// Matches titles that already end in a year between 1000 and 2999, e.g. "The Flash (2014)"
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([12][0-9]{3}\)$").expect("valid year regex"));

/// Display title with the release year appended, unless the title already carries one.
///
/// Avoids results like "The Flash (2014) (2014)". Items without a known year keep
/// their title untouched.
pub fn normalize_title(title: &str, year: Option<i32>) -> String {
    match year {
        Some(year) if !TRAILING_YEAR.is_match(title) => format!("{} ({})", title, year),
        _ => title.to_string(),
    }
}
