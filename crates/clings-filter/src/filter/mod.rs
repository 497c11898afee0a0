//! Filter expression parser and evaluator.
//!
//! This module provides a small SQL-like predicate language for deciding
//! whether a record satisfies a filter, without a round-trip to whatever
//! store the records came from.
//!
//! # Supported Syntax
//!
//! ## Conditions
//! - `field = value`, `field != value`
//! - `field < value`, `<=`, `>`, `>=` (dates only)
//! - `field LIKE 'pat%ern_'` - `%` is any run of characters, `_` is one character
//! - `field CONTAINS value` - substring of a text field, or element of a list field
//! - `field IN ('a', 'b')`
//! - `field IS NULL`, `field IS NOT NULL`
//!
//! ## Values
//! - `'quoted'` or `"quoted"` strings, with `\` escapes
//! - bare words, typed as booleans, integers, dates or strings
//! - dates: `today`, `tomorrow`, `yesterday`, `YYYY-MM-DD`, `in N days`,
//!   weekday names (the next such day after today)
//!
//! ## Boolean Operators
//! - `AND`, `OR` - same precedence, evaluated left to right
//! - `NOT` - applies to the next condition or group
//! - `()` - grouping
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use clings_filter::filter::{filter_items, FieldValue, FilterParser};
//!
//! // Parse a filter expression
//! let expr = FilterParser::new()
//!     .parse("(status = open OR status = canceled) AND tags CONTAINS 'urgent'")
//!     .unwrap();
//!
//! let mut record = HashMap::new();
//! record.insert("status".to_string(), FieldValue::from("canceled"));
//! record.insert("tags".to_string(), FieldValue::from(vec!["Urgent".to_string()]));
//!
//! let records = vec![record];
//! assert_eq!(filter_items(&records, &expr).len(), 1);
//! ```

mod ast;
mod dates;
mod error;
mod evaluator;
mod parser;
mod record;
mod value;

pub use ast::{FilterCondition, FilterExpression, FilterOperator, LogicalOperator};
pub use dates::resolve_date;
pub use error::{FilterError, FilterErrorKind, FilterResult};
pub use evaluator::{filter_items, matches, FilterEvaluator};
pub use parser::{parse_filter, FilterParser, MAX_CONDITIONS, MAX_NESTING_DEPTH};
pub use record::Filterable;
pub use value::{FieldValue, FilterValue};
