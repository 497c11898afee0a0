//! Typed values on both sides of a filter condition.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::resolve_date;

/// A literal value appearing in a filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Text, compared case-insensitively.
    String(String),

    /// A calendar day, already resolved from any relative literal.
    Date(NaiveDate),

    /// `true` or `false`.
    Bool(bool),

    /// A signed integer.
    Integer(i64),

    /// An ordered list of strings (duplicates allowed), used with `IN`.
    StringList(Vec<String>),

    /// No value; only paired with `IS NULL` / `IS NOT NULL`.
    None,
}

impl FilterValue {
    /// Infers a typed value from raw text.
    ///
    /// The first rule that applies wins:
    ///
    /// 1. `'text'` or `"text"` becomes a string without the quotes.
    /// 2. `(a, 'b')` becomes a string list; items are trimmed and unquoted.
    /// 3. `true` / `false` (any case) becomes a boolean.
    /// 4. An optional `-` followed only by digits becomes an integer.
    /// 5. A date literal (see [`resolve_date`]) becomes a date.
    /// 6. Anything else is kept as a plain string.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use clings_filter::filter::FilterValue;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    /// assert_eq!(FilterValue::infer("42", today), FilterValue::Integer(42));
    /// assert_eq!(FilterValue::infer("TRUE", today), FilterValue::Bool(true));
    /// assert_eq!(FilterValue::infer("today", today), FilterValue::Date(today));
    /// assert_eq!(
    ///     FilterValue::infer("'today'", today),
    ///     FilterValue::String("today".to_string())
    /// );
    /// ```
    pub fn infer(raw: &str, today: NaiveDate) -> Self {
        if let Some(inner) = strip_matching_quotes(raw) {
            return FilterValue::String(inner.to_string());
        }

        if let Some(inner) = raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            let items = if inner.trim().is_empty() {
                Vec::new()
            } else {
                inner
                    .split(',')
                    .map(|item| {
                        let item = item.trim();
                        strip_matching_quotes(item).unwrap_or(item).to_string()
                    })
                    .collect()
            };
            return FilterValue::StringList(items);
        }

        if raw.eq_ignore_ascii_case("true") {
            return FilterValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return FilterValue::Bool(false);
        }

        if let Some(n) = parse_integer(raw) {
            return FilterValue::Integer(n);
        }

        if let Some(date) = resolve_date(raw, today) {
            return FilterValue::Date(date);
        }

        FilterValue::String(raw.to_string())
    }

    /// Returns true for [`FilterValue::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, FilterValue::None)
    }
}

/// Writes the value in filter syntax, such that parsing it back yields the
/// same value. [`FilterValue::None`] writes nothing.
impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => write_quoted(f, s),
            FilterValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::Integer(n) => write!(f, "{n}"),
            FilterValue::StringList(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, item)?;
                }
                f.write_str(")")
            }
            FilterValue::None => Ok(()),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("'")
}

/// Strips a matching pair of `'` or `"` quotes.
fn strip_matching_quotes(s: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            Some(&s[1..s.len() - 1])
        } else {
            None
        }
    })
}

fn parse_integer(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// A value extracted from a record for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Text that is always present.
    String(String),

    /// Text that may be absent.
    OptionalString(Option<String>),

    /// A calendar day that is always present.
    Date(NaiveDate),

    /// A calendar day that may be absent.
    OptionalDate(Option<NaiveDate>),

    /// A boolean flag.
    Bool(bool),

    /// A signed integer.
    Integer(i64),

    /// A list of strings, such as tags.
    StringList(Vec<String>),
}

impl FieldValue {
    /// Returns true only for an optional variant holding no value.
    ///
    /// Non-optional fields are never null, even when empty.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            FieldValue::OptionalString(None) | FieldValue::OptionalDate(None)
        )
    }

    /// Returns the text of a string field, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::OptionalString(Some(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the day of a date field, if present.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) | FieldValue::OptionalDate(Some(d)) => Some(*d),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<Option<String>> for FieldValue {
    fn from(s: Option<String>) -> Self {
        FieldValue::OptionalString(s)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(d: Option<NaiveDate>) -> Self {
        FieldValue::OptionalDate(d)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::StringList(items)
    }
}
