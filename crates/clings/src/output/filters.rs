//! Parsed filter formatting.

use clings_filter::filter::FilterExpression;
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct CheckOutput<'a> {
    pub filter: &'a str,
    pub normalized: String,
    pub fields: Vec<&'a str>,
    pub expression: &'a FilterExpression,
}

/// Formats a parsed filter as JSON.
pub fn format_filter_json(
    filter: &str,
    expression: &FilterExpression,
) -> Result<String, serde_json::Error> {
    let output = CheckOutput {
        filter,
        normalized: expression.to_string(),
        fields: expression.fields(),
        expression,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a parsed filter as an indented tree, one node per line.
///
/// Logical operators are printed above their operands, so the grouping the
/// parser chose is visible.
pub fn format_filter_tree(expression: &FilterExpression, use_colors: bool) -> String {
    let mut output = String::new();
    write_node(&mut output, expression, 0, use_colors);
    output
}

fn write_node(output: &mut String, expression: &FilterExpression, depth: usize, use_colors: bool) {
    let indent = "  ".repeat(depth);
    match expression {
        FilterExpression::Condition(condition) => {
            output.push_str(&format!("{indent}{condition}\n"));
        }
        FilterExpression::Not(inner) => {
            output.push_str(&format!("{indent}{}\n", keyword("NOT", use_colors)));
            write_node(output, inner, depth + 1, use_colors);
        }
        FilterExpression::Compound { left, op, right } => {
            output.push_str(&format!("{indent}{}\n", keyword(op.as_str(), use_colors)));
            write_node(output, left, depth + 1, use_colors);
            write_node(output, right, depth + 1, use_colors);
        }
    }
}

fn keyword(word: &str, use_colors: bool) -> String {
    if use_colors {
        word.cyan().bold().to_string()
    } else {
        word.to_string()
    }
}
