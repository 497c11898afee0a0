//! Check command implementation.
//!
//! Parses a filter expression and prints the tree it produced.

use clings_filter::filter::FilterParser;
use owo_colors::OwoColorize;

use super::{CommandContext, Result};
use crate::output::{format_filter_json, format_filter_tree};

/// Executes the check command.
///
/// # Errors
///
/// Returns a filter error, with its position, if the expression does not parse.
pub fn execute(ctx: &CommandContext, filter: &str) -> Result<()> {
    let expression = FilterParser::new().parse(filter)?;

    if ctx.json_output {
        println!("{}", format_filter_json(filter, &expression)?);
    } else if !ctx.quiet {
        let header = "Parsed filter";
        if ctx.use_colors {
            println!("{}", header.green().bold());
        } else {
            println!("{}", header);
        }
        println!("{}\n", expression);
        print!("{}", format_filter_tree(&expression, ctx.use_colors));
        if ctx.verbose {
            println!("\nFields: {}", expression.fields().join(", "));
        }
    }

    Ok(())
}

/// Renders a caret under the byte `position` of `filter`, for error output.
pub fn error_pointer(filter: &str, position: usize) -> String {
    let column = filter
        .char_indices()
        .take_while(|(i, _)| *i < position)
        .count();
    format!("  {}\n  {}^", filter, " ".repeat(column))
}
