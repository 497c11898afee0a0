//! Natural-language date literals.
//!
//! Resolution is relative to an explicit `today` so callers (and tests) control
//! the clock.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Resolves a date literal relative to `today`.
///
/// Recognized forms, tried in order against the lowercased token:
///
/// - `today`, `tomorrow`, `yesterday`
/// - ISO dates: `YYYY-MM-DD`
/// - `in N days` (and `in 1 day`), where `N` is a non-negative integer
/// - full English weekday names, resolving to the next occurrence strictly
///   after `today` (a week out when `today` is that weekday)
///
/// Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use clings_filter::filter::resolve_date;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(); // a Wednesday
/// assert_eq!(resolve_date("tomorrow", today), NaiveDate::from_ymd_opt(2025, 1, 16));
/// assert_eq!(resolve_date("in 3 days", today), NaiveDate::from_ymd_opt(2025, 1, 18));
/// assert_eq!(resolve_date("wednesday", today), NaiveDate::from_ymd_opt(2025, 1, 22));
/// assert_eq!(resolve_date("someday", today), None);
/// ```
pub fn resolve_date(token: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = token.trim().to_lowercase();

    match lower.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.checked_add_days(Days::new(1)),
        "yesterday" => return today.checked_sub_days(Days::new(1)),
        _ => {}
    }

    if let Some(date) = parse_iso_date(&lower) {
        return Some(date);
    }

    if let Some(days) = parse_in_days(&lower) {
        return today.checked_add_days(Days::new(days));
    }

    parse_weekday(&lower).and_then(|weekday| next_weekday_after(today, weekday))
}

/// Parses a strict `YYYY-MM-DD` date.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parses `in N days` / `in 1 day`, returning N.
fn parse_in_days(s: &str) -> Option<u64> {
    let mut words = s.split_whitespace();
    if words.next()? != "in" {
        return None;
    }
    let count = words.next()?;
    let unit = words.next()?;
    if words.next().is_some() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u64 = count.parse().ok()?;
    match unit {
        "days" => Some(n),
        "day" if n == 1 => Some(n),
        _ => None,
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next date falling on `weekday`, strictly after `today`.
fn next_weekday_after(today: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let current = today.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let ahead = match (target + 7 - current) % 7 {
        0 => 7,
        n => n,
    };
    today.checked_add_days(Days::new(u64::from(ahead)))
}
