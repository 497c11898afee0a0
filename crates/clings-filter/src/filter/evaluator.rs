//! Filter evaluation against records.
//!
//! This module provides the [`FilterEvaluator`] for evaluating parsed filter
//! expressions against any [`Filterable`] record.
//!
//! Evaluation is total: unknown fields, type mismatches and null values all
//! produce `false` (or `true` for `IS NULL`) rather than an error, so a batch
//! scan over incomplete records never aborts.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use clings_filter::filter::{FieldValue, FilterEvaluator, FilterParser};
//!
//! let expr = FilterParser::new().parse("status = open AND tags CONTAINS 'work'").unwrap();
//!
//! let mut record = HashMap::new();
//! record.insert("status".to_string(), FieldValue::from("Open"));
//! record.insert("tags".to_string(), FieldValue::from(vec!["Work".to_string()]));
//!
//! let evaluator = FilterEvaluator::new(&expr);
//! assert!(evaluator.matches(&record));
//! ```

use regex::Regex;
use tracing::{debug, trace};

use super::ast::{FilterCondition, FilterExpression, FilterOperator, LogicalOperator};
use super::record::Filterable;
use super::value::{FieldValue, FilterValue};

/// Evaluates a parsed filter against records.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    expression: &'a FilterExpression,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    pub fn new(expression: &'a FilterExpression) -> Self {
        Self { expression }
    }

    /// Returns true if the record matches the filter.
    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        evaluate(self.expression, record)
    }

    /// Filters a slice of records, returning only those that match, in order.
    pub fn filter_items<'b, R: Filterable>(&self, items: &'b [R]) -> Vec<&'b R> {
        let matched: Vec<&R> = items
            .iter()
            .enumerate()
            .filter(|(index, item)| {
                let is_match = self.matches(*item);
                trace!(index = *index, is_match, "evaluated record");
                is_match
            })
            .map(|(_, item)| item)
            .collect();
        debug!(
            filter = %self.expression,
            total = items.len(),
            matched = matched.len(),
            "filtered records"
        );
        matched
    }
}

/// Returns true if `record` satisfies `expression`.
pub fn matches<R: Filterable + ?Sized>(expression: &FilterExpression, record: &R) -> bool {
    evaluate(expression, record)
}

/// Returns the records in `items` that satisfy `expression`, in order.
pub fn filter_items<'b, R: Filterable>(
    items: &'b [R],
    expression: &FilterExpression,
) -> Vec<&'b R> {
    FilterEvaluator::new(expression).filter_items(items)
}

impl FilterExpression {
    /// Returns true if `record` satisfies this expression.
    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        evaluate(self, record)
    }
}

fn evaluate<R: Filterable + ?Sized>(expression: &FilterExpression, record: &R) -> bool {
    match expression {
        FilterExpression::Condition(condition) => evaluate_condition(condition, record),
        FilterExpression::Not(inner) => !evaluate(inner, record),
        FilterExpression::Compound { left, op, right } => match op {
            LogicalOperator::And => evaluate(left, record) && evaluate(right, record),
            LogicalOperator::Or => evaluate(left, record) || evaluate(right, record),
        },
    }
}

fn evaluate_condition<R: Filterable + ?Sized>(condition: &FilterCondition, record: &R) -> bool {
    let Some(field) = record.field_value(&condition.field) else {
        trace!(field = %condition.field, "field not present on record");
        return condition.operator == FilterOperator::IsNull;
    };

    let value = &condition.value;
    match condition.operator {
        FilterOperator::Equal => equals(&field, value),
        FilterOperator::NotEqual => !equals(&field, value),
        FilterOperator::LessThan => compare_dates(&field, value, |a, b| a < b),
        FilterOperator::LessThanOrEqual => compare_dates(&field, value, |a, b| a <= b),
        FilterOperator::GreaterThan => compare_dates(&field, value, |a, b| a > b),
        FilterOperator::GreaterThanOrEqual => compare_dates(&field, value, |a, b| a >= b),
        FilterOperator::Like => like(&field, value),
        FilterOperator::Contains => contains(&field, value),
        FilterOperator::In => is_in(&field, value),
        FilterOperator::IsNull => field.is_null(),
        FilterOperator::IsNotNull => !field.is_null(),
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn equals(field: &FieldValue, value: &FilterValue) -> bool {
    match (field, value) {
        (FieldValue::String(s) | FieldValue::OptionalString(Some(s)), FilterValue::String(v)) => {
            eq_ignore_case(s, v)
        }
        (FieldValue::Date(d) | FieldValue::OptionalDate(Some(d)), FilterValue::Date(v)) => d == v,
        (FieldValue::Bool(a), FilterValue::Bool(b)) => a == b,
        (FieldValue::Integer(a), FilterValue::Integer(b)) => a == b,
        (FieldValue::StringList(items), FilterValue::String(v)) => {
            items.iter().any(|item| eq_ignore_case(item, v))
        }
        _ => false,
    }
}

/// Ordering comparisons are only defined between dates.
fn compare_dates(
    field: &FieldValue,
    value: &FilterValue,
    cmp: impl Fn(chrono::NaiveDate, chrono::NaiveDate) -> bool,
) -> bool {
    match (field.as_date(), value) {
        (Some(d), FilterValue::Date(v)) => cmp(d, *v),
        _ => false,
    }
}

fn like(field: &FieldValue, value: &FilterValue) -> bool {
    let (Some(s), FilterValue::String(pattern)) = (field.as_str(), value) else {
        return false;
    };
    like_regex(pattern).is_some_and(|re| re.is_match(s))
}

/// Translates a LIKE pattern into an anchored, case-insensitive regex.
/// `%` matches any run of characters and `_` exactly one; everything else is
/// literal.
fn like_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::from("(?is)^");
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '%' | '_' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '%' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');

    match Regex::new(&source) {
        Ok(re) => Some(re),
        Err(e) => {
            debug!(pattern, error = %e, "LIKE pattern could not be compiled");
            None
        }
    }
}

fn contains(field: &FieldValue, value: &FilterValue) -> bool {
    let FilterValue::String(needle) = value else {
        return false;
    };
    match field {
        FieldValue::StringList(items) => items.iter().any(|item| eq_ignore_case(item, needle)),
        _ => field
            .as_str()
            .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
    }
}

fn is_in(field: &FieldValue, value: &FilterValue) -> bool {
    let FilterValue::StringList(allowed) = value else {
        return false;
    };
    let is_allowed = |s: &str| allowed.iter().any(|a| eq_ignore_case(a, s));
    match field {
        FieldValue::StringList(items) => items.iter().all(|item| is_allowed(item.as_str())),
        _ => field.as_str().is_some_and(is_allowed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_regex_escapes_metacharacters() {
        let re = like_regex("a.b%").unwrap();
        assert!(re.is_match("a.bcd"));
        assert!(!re.is_match("axbcd"));

        let re = like_regex("(x)[y]+").unwrap();
        assert!(re.is_match("(X)[Y]+"));
    }

    #[test]
    fn test_like_regex_is_anchored() {
        let re = like_regex("ab").unwrap();
        assert!(re.is_match("AB"));
        assert!(!re.is_match("xab"));
        assert!(!re.is_match("abx"));
    }

    #[test]
    fn test_like_regex_wildcards() {
        let re = like_regex("a_c").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("ac"));
        assert!(!re.is_match("abbc"));

        let re = like_regex("%").unwrap();
        assert!(re.is_match(""));
        assert!(re.is_match("anything\nat all"));
    }

    #[test]
    fn test_eq_ignore_case_unicode() {
        assert!(eq_ignore_case("ÉTÉ", "été"));
        assert!(!eq_ignore_case("a", "b"));
    }
}
