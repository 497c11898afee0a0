//! SQL-like filter expressions for task records.
//!
//! This crate provides a parser and evaluator for predicates such as
//! `status = open AND due < today`, plus the [`Todo`] record those predicates
//! are most often run against. Any other record type can be filtered by
//! implementing [`filter::Filterable`].

pub mod filter;
pub mod todo;

pub use todo::{Status, Todo};
