//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::FilterValue;

/// Represents a parsed filter expression.
///
/// Trees are immutable once built and hold no parser state, so a single
/// expression can be evaluated against any number of records, from any
/// number of threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterExpression {
    /// A single field comparison.
    Condition(FilterCondition),

    /// Logical NOT of an expression.
    Not(Box<FilterExpression>),

    /// Two expressions joined by AND or OR.
    Compound {
        left: Box<FilterExpression>,
        op: LogicalOperator,
        right: Box<FilterExpression>,
    },
}

impl FilterExpression {
    /// Creates a condition expression.
    ///
    /// # Example
    ///
    /// ```
    /// use clings_filter::filter::{FilterExpression, FilterOperator, FilterValue};
    ///
    /// let expr = FilterExpression::condition(
    ///     "status",
    ///     FilterOperator::Equal,
    ///     FilterValue::String("open".to_string()),
    /// );
    /// assert_eq!(expr.to_string(), "status = 'open'");
    /// ```
    pub fn condition(
        field: impl Into<String>,
        operator: FilterOperator,
        value: FilterValue,
    ) -> Self {
        FilterExpression::Condition(FilterCondition {
            field: field.into(),
            operator,
            value,
        })
    }

    /// Creates an AND expression from two expressions.
    pub fn and(left: FilterExpression, right: FilterExpression) -> Self {
        Self::compound(left, LogicalOperator::And, right)
    }

    /// Creates an OR expression from two expressions.
    pub fn or(left: FilterExpression, right: FilterExpression) -> Self {
        Self::compound(left, LogicalOperator::Or, right)
    }

    /// Creates a compound expression.
    pub fn compound(left: FilterExpression, op: LogicalOperator, right: FilterExpression) -> Self {
        FilterExpression::Compound {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a NOT expression from another expression.
    pub fn negate(inner: FilterExpression) -> Self {
        FilterExpression::Not(Box::new(inner))
    }

    /// Returns the distinct field names referenced by this expression, in
    /// order of first appearance.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, fields: &mut Vec<&'a str>) {
        match self {
            FilterExpression::Condition(condition) => {
                if !fields
                    .iter()
                    .any(|f| f.eq_ignore_ascii_case(&condition.field))
                {
                    fields.push(&condition.field);
                }
            }
            FilterExpression::Not(inner) => inner.collect_fields(fields),
            FilterExpression::Compound { left, right, .. } => {
                left.collect_fields(fields);
                right.collect_fields(fields);
            }
        }
    }
}

/// Writes the expression in filter syntax.
///
/// Compound expressions fold left to right, so only a compound on the right
/// (or under NOT) needs parentheses for the output to parse back to the same
/// tree.
impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Condition(condition) => write!(f, "{condition}"),
            FilterExpression::Not(inner) => match inner.as_ref() {
                FilterExpression::Compound { .. } => write!(f, "NOT ({inner})"),
                _ => write!(f, "NOT {inner}"),
            },
            FilterExpression::Compound { left, op, right } => {
                write!(f, "{left} {op} ")?;
                match right.as_ref() {
                    FilterExpression::Compound { .. } => write!(f, "({right})"),
                    _ => write!(f, "{right}"),
                }
            }
        }
    }
}

/// An atomic comparison of one field against one literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Field name, matched case-insensitively against the record.
    pub field: String,
    /// The comparison operator.
    pub operator: FilterOperator,
    /// The literal to compare against; [`FilterValue::None`] for null checks.
    pub value: FilterValue,
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator.takes_value() {
            write!(f, "{} {} {}", self.field, self.operator, self.value)
        } else {
            write!(f, "{} {}", self.field, self.operator)
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `LIKE` with `%` and `_` wildcards.
    Like,
    /// `CONTAINS`
    Contains,
    /// `IN (...)`
    In,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
}

impl FilterOperator {
    /// Operators in the order the parser tries them. Longer tokens come
    /// before their prefixes (`<=` before `<`, `IS NOT NULL` before `IS NULL`).
    pub const PARSE_ORDER: [FilterOperator; 11] = [
        FilterOperator::IsNotNull,
        FilterOperator::IsNull,
        FilterOperator::Contains,
        FilterOperator::Like,
        FilterOperator::In,
        FilterOperator::LessThanOrEqual,
        FilterOperator::GreaterThanOrEqual,
        FilterOperator::NotEqual,
        FilterOperator::LessThan,
        FilterOperator::GreaterThan,
        FilterOperator::Equal,
    ];

    /// Returns the operator as written in filter syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "=",
            FilterOperator::NotEqual => "!=",
            FilterOperator::LessThan => "<",
            FilterOperator::LessThanOrEqual => "<=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::GreaterThanOrEqual => ">=",
            FilterOperator::Like => "LIKE",
            FilterOperator::Contains => "CONTAINS",
            FilterOperator::In => "IN",
            FilterOperator::IsNull => "IS NULL",
            FilterOperator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Returns false for the null checks, which are written without a value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean connective of a compound expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// Returns the keyword as written in filter syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
