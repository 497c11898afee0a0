//! Recursive descent parser for filter expressions.

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::ast::{FilterExpression, FilterOperator, LogicalOperator};
use super::error::{FilterError, FilterResult};
use super::value::FilterValue;

/// Maximum nesting of parentheses and `NOT` before parsing is refused.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Maximum number of conditions in one expression.
///
/// AND/OR chains fold into a left-leaning tree whose height grows with the
/// chain, so this also bounds the recursion of evaluation, `Display` and drop.
pub const MAX_CONDITIONS: usize = 1024;

/// Parser for SQL-like filter expressions.
///
/// # Grammar
///
/// ```text
/// expr      ::= atom (("AND" | "OR") atom)*
/// atom      ::= "NOT" atom | "(" expr ")" | condition
/// condition ::= identifier operator [value]
/// operator  ::= "IS NOT NULL" | "IS NULL" | "CONTAINS" | "LIKE" | "IN"
///             | "<=" | ">=" | "!=" | "<" | ">" | "="
/// value     ::= quoted-string | "(" quoted-string ("," quoted-string)* ")"
///             | bare-word
/// ```
///
/// `AND` and `OR` share one precedence level and fold left to right:
/// `a AND b OR c` is `(a AND b) OR c`, and `a OR b AND c` is
/// `(a OR b) AND c`. Use parentheses to group differently.
///
/// Keywords are case-insensitive. Bare words are typed by
/// [`FilterValue::infer`], so date literals such as `today` or `friday` are
/// resolved against the parser's `today` while parsing.
///
/// # Example
///
/// ```
/// use clings_filter::filter::{FilterExpression, FilterParser};
///
/// let expr = FilterParser::new().parse("status = open AND due < today").unwrap();
/// assert!(matches!(expr, FilterExpression::Compound { .. }));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FilterParser {
    today: NaiveDate,
}

impl Default for FilterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterParser {
    /// Creates a parser that resolves relative dates against the local
    /// calendar day.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Creates a parser that resolves relative dates against `today`.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Returns the day relative dates are resolved against.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Parses a filter expression string into a [`FilterExpression`].
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] encountered. No partial expression
    /// is produced.
    pub fn parse(&self, input: &str) -> FilterResult<FilterExpression> {
        let mut cursor = Cursor::new(input, self.today);
        let result = cursor.parse_expression(0).and_then(|expr| {
            cursor.skip_whitespace();
            if cursor.is_at_end() {
                Ok(expr)
            } else {
                Err(FilterError::TrailingInput {
                    position: cursor.position,
                })
            }
        });

        match &result {
            Ok(expr) => debug!(filter = input, parsed = %expr, "parsed filter expression"),
            Err(e) => debug!(filter = input, error = %e, "failed to parse filter expression"),
        }
        result
    }
}

/// Parses `input`, resolving relative dates against the local calendar day.
///
/// # Errors
///
/// See [`FilterParser::parse`].
pub fn parse_filter(input: &str) -> FilterResult<FilterExpression> {
    FilterParser::new().parse(input)
}

/// Returns true for characters that continue a word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse position within a borrowed input string.
struct Cursor<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    position: usize,
    /// Conditions parsed so far.
    conditions: usize,
    today: NaiveDate,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str, today: NaiveDate) -> Self {
        Self {
            input,
            position: 0,
            conditions: 0,
            today,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Consumes `word` (ASCII, case-insensitive) if it is followed by a word
    /// boundary. Leaves the cursor untouched otherwise.
    fn eat_keyword(&mut self, word: &str) -> bool {
        let rest = self.rest();
        let Some(candidate) = rest.get(..word.len()) else {
            return false;
        };
        if !candidate.eq_ignore_ascii_case(word) {
            return false;
        }
        if rest[word.len()..].chars().next().is_some_and(is_word_char) {
            return false;
        }
        self.position += word.len();
        true
    }

    /// Consumes `operator` if it comes next, restoring the cursor on mismatch.
    fn eat_operator(&mut self, operator: FilterOperator) -> bool {
        let token = operator.as_str();
        if !token.starts_with(|c: char| c.is_ascii_alphabetic()) {
            if self.rest().starts_with(token) {
                self.position += token.len();
                return true;
            }
            return false;
        }

        let start = self.position;
        for (i, word) in token.split(' ').enumerate() {
            if i > 0 {
                let before = self.position;
                self.skip_whitespace();
                if self.position == before {
                    self.position = start;
                    return false;
                }
            }
            if !self.eat_keyword(word) {
                self.position = start;
                return false;
            }
        }
        true
    }

    /// `expr ::= atom (("AND" | "OR") atom)*`, folded left to right.
    fn parse_expression(&mut self, depth: usize) -> FilterResult<FilterExpression> {
        let mut left = self.parse_atom(depth)?;

        loop {
            let before = self.position;
            self.skip_whitespace();
            let op = if self.eat_keyword("AND") {
                LogicalOperator::And
            } else if self.eat_keyword("OR") {
                LogicalOperator::Or
            } else {
                self.position = before;
                break;
            };
            let right = self.parse_atom(depth)?;
            left = FilterExpression::compound(left, op, right);
        }

        Ok(left)
    }

    /// `atom ::= "NOT" atom | "(" expr ")" | condition`
    fn parse_atom(&mut self, depth: usize) -> FilterResult<FilterExpression> {
        self.skip_whitespace();
        if depth > MAX_NESTING_DEPTH {
            return Err(FilterError::NestingTooDeep {
                position: self.position,
                max_depth: MAX_NESTING_DEPTH,
            });
        }

        if self.eat_keyword("NOT") {
            let inner = self.parse_atom(depth + 1)?;
            return Ok(FilterExpression::negate(inner));
        }

        if self.eat_char('(') {
            let inner = self.parse_expression(depth + 1)?;
            self.skip_whitespace();
            if !self.eat_char(')') {
                return Err(FilterError::ExpectedClosingParen {
                    position: self.position,
                });
            }
            return Ok(inner);
        }

        self.parse_condition()
    }

    /// `condition ::= identifier operator [value]`
    fn parse_condition(&mut self) -> FilterResult<FilterExpression> {
        if self.conditions == MAX_CONDITIONS {
            return Err(FilterError::TooManyConditions {
                position: self.position,
                max_conditions: MAX_CONDITIONS,
            });
        }
        self.conditions += 1;

        let field = self.read_identifier()?;

        self.skip_whitespace();
        let operator = FilterOperator::PARSE_ORDER
            .into_iter()
            .find(|op| self.eat_operator(*op))
            .ok_or(FilterError::UnknownOperator {
                position: self.position,
            })?;

        let value = if operator.takes_value() {
            self.parse_value(operator)?
        } else {
            FilterValue::None
        };

        Ok(FilterExpression::condition(field, operator, value))
    }

    fn read_identifier(&mut self) -> FilterResult<&'a str> {
        let start = self.position;
        while self.peek().is_some_and(is_word_char) {
            self.next_char();
        }
        if self.position == start {
            return Err(FilterError::ExpectedIdentifier { position: start });
        }
        Ok(&self.input[start..self.position])
    }

    fn parse_value(&mut self, operator: FilterOperator) -> FilterResult<FilterValue> {
        self.skip_whitespace();
        let start = self.position;

        match self.peek() {
            None => Err(FilterError::ExpectedValue { position: start }),
            Some('(') => self.parse_list(),
            Some(_) if operator == FilterOperator::In => {
                Err(FilterError::ExpectedList { position: start })
            }
            Some(quote @ ('\'' | '"')) => self.read_quoted(quote).map(FilterValue::String),
            Some(_) => {
                while self
                    .peek()
                    .is_some_and(|c| !c.is_whitespace() && c != ')')
                {
                    self.next_char();
                }
                if self.position == start {
                    return Err(FilterError::ExpectedValue { position: start });
                }
                let raw = &self.input[start..self.position];
                Ok(FilterValue::infer(raw, self.today))
            }
        }
    }

    /// Reads a quoted string starting at the opening `quote`. A backslash
    /// makes the following character literal.
    fn read_quoted(&mut self, quote: char) -> FilterResult<String> {
        let start = self.position;
        self.next_char();

        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if c == quote {
                return Ok(result);
            }
            if c == '\\' {
                match self.next_char() {
                    Some(escaped) => result.push(escaped),
                    None => break,
                }
            } else {
                result.push(c);
            }
        }

        Err(FilterError::UnterminatedString { position: start })
    }

    /// Reads `( 'a' , 'b' )`. The empty list `()` is allowed.
    fn parse_list(&mut self) -> FilterResult<FilterValue> {
        self.next_char();
        self.skip_whitespace();

        let mut items = Vec::new();
        if self.eat_char(')') {
            return Ok(FilterValue::StringList(items));
        }

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(quote @ ('\'' | '"')) => items.push(self.read_quoted(quote)?),
                _ => {
                    return Err(FilterError::ListItemMustBeString {
                        position: self.position,
                    })
                }
            }

            self.skip_whitespace();
            if self.eat_char(',') {
                continue;
            }
            if self.eat_char(')') {
                return Ok(FilterValue::StringList(items));
            }
            return Err(FilterError::ExpectedCommaOrClosingParen {
                position: self.position,
            });
        }
    }
}
