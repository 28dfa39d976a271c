use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Tried in this order; the first format giving a real calendar date wins,
/// so `03/04/2024` reads as 4 March (US) and never as 3 April.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{1,2}-\d{1,2}|\d{1,2}/\d{1,2}/\d{4})(?:$|[Tt ])")
        .expect("date token pattern is a valid regex")
});

#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    let token = DATE_TOKEN.captures(trimmed)?.get(1)?.as_str();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}
