//! Output formatting utilities for the clings CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//!
//! - [`todos`] - Search result formatting
//! - [`filters`] - Parsed filter formatting (check command)
//! - [`helpers`] - Common formatting utilities (truncation, status, due dates)

mod filters;
pub mod helpers;
mod todos;

pub use filters::{format_filter_json, format_filter_tree};
pub use todos::{format_todos_json, format_todos_table};
