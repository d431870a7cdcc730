use chrono::NaiveDate;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse the calendar-day portion of a date or date-time string.
///
/// Anything from the first time separator (`T`, `t` or a space) onward is
/// dropped, so `2024-03-01`, `2024-03-01T09:30:00Z` and
/// `2024-03-01 09:30:00+09:00` all normalize to the same day. Returns `None`
/// when the remaining text is not a real calendar date.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let day_part = match trimmed.find(['T', 't', ' ']) {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };
    if day_part.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(day_part, DAY_FORMAT).ok()
}

/// Inclusive number of days covered by `start..=end`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}
