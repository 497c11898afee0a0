//! Error types for the filter parser.

use thiserror::Error;

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur during filter parsing.
///
/// Every variant records the byte offset into the input where parsing
/// stopped. Parsing is all-or-nothing: no partial expression is ever
/// returned alongside an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A field name was expected but not found.
    #[error("expected field name at position {position}")]
    ExpectedIdentifier {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// No known operator follows the field name.
    #[error("unknown operator at position {position}")]
    UnknownOperator {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// The operator requires a value but none was given.
    #[error("expected value at position {position}")]
    ExpectedValue {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// A quoted string has no closing quote.
    #[error("unterminated string starting at position {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// A group opened with `(` was never closed.
    #[error("expected ')' at position {position}")]
    ExpectedClosingParen {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// `IN` was followed by something other than a parenthesized list.
    #[error("expected list like ('a', 'b') at position {position}")]
    ExpectedList {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// A list item was followed by something other than `,` or `)`.
    #[error("expected ',' or ')' in list at position {position}")]
    ExpectedCommaOrClosingParen {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// List items must be quoted strings.
    #[error("list items must be quoted strings (position {position})")]
    ListItemMustBeString {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// A complete expression was followed by something other than AND/OR.
    #[error("unexpected input at position {position}")]
    TrailingInput {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// Parentheses or NOTs are nested deeper than the parser allows.
    #[error("expression nested deeper than {max_depth} levels at position {position}")]
    NestingTooDeep {
        /// Byte offset where the limit was hit.
        position: usize,
        /// The nesting limit.
        max_depth: usize,
    },

    /// The expression holds more conditions than the parser allows.
    #[error("expression has more than {max_conditions} conditions at position {position}")]
    TooManyConditions {
        /// Byte offset of the first condition over the limit.
        position: usize,
        /// The condition limit.
        max_conditions: usize,
    },
}

/// Discriminant of a [`FilterError`], without position data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterErrorKind {
    ExpectedIdentifier,
    UnknownOperator,
    ExpectedValue,
    UnterminatedString,
    ExpectedClosingParen,
    ExpectedList,
    ExpectedCommaOrClosingParen,
    ListItemMustBeString,
    TrailingInput,
    NestingTooDeep,
    TooManyConditions,
}

impl FilterError {
    /// Returns the byte offset where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            FilterError::ExpectedIdentifier { position }
            | FilterError::UnknownOperator { position }
            | FilterError::ExpectedValue { position }
            | FilterError::UnterminatedString { position }
            | FilterError::ExpectedClosingParen { position }
            | FilterError::ExpectedList { position }
            | FilterError::ExpectedCommaOrClosingParen { position }
            | FilterError::ListItemMustBeString { position }
            | FilterError::TrailingInput { position }
            | FilterError::NestingTooDeep { position, .. }
            | FilterError::TooManyConditions { position, .. } => *position,
        }
    }

    /// Returns the kind of error, ignoring where it happened.
    pub fn kind(&self) -> FilterErrorKind {
        match self {
            FilterError::ExpectedIdentifier { .. } => FilterErrorKind::ExpectedIdentifier,
            FilterError::UnknownOperator { .. } => FilterErrorKind::UnknownOperator,
            FilterError::ExpectedValue { .. } => FilterErrorKind::ExpectedValue,
            FilterError::UnterminatedString { .. } => FilterErrorKind::UnterminatedString,
            FilterError::ExpectedClosingParen { .. } => FilterErrorKind::ExpectedClosingParen,
            FilterError::ExpectedList { .. } => FilterErrorKind::ExpectedList,
            FilterError::ExpectedCommaOrClosingParen { .. } => {
                FilterErrorKind::ExpectedCommaOrClosingParen
            }
            FilterError::ListItemMustBeString { .. } => FilterErrorKind::ListItemMustBeString,
            FilterError::TrailingInput { .. } => FilterErrorKind::TrailingInput,
            FilterError::NestingTooDeep { .. } => FilterErrorKind::NestingTooDeep,
            FilterError::TooManyConditions { .. } => FilterErrorKind::TooManyConditions,
        }
    }
}
