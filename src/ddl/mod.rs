//! PostgreSQL DDL dump parsing.
//!
//! Two-phase structure: a statement scan locates `CREATE TABLE`,
//! `CREATE TYPE ... AS ENUM` and `COMMENT ON` bodies, then each table
//! body is comma-split at nesting depth zero and every fragment is
//! parsed as a column or constraint definition. Malformed statements
//! are skipped and reported as warnings, never as errors.

mod assembler;
mod column;
mod comment;
mod constraint;
mod scanner;
mod splitter;

pub use assembler::{ParseOutcome, parse_ddl};
pub use column::parse_column;
pub use constraint::parse_constraint;
pub use splitter::split_definitions;

use thiserror::Error;

/// Non-fatal condition encountered while parsing a DDL dump.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Warning {
    #[error("unterminated {kind} statement for \"{name}\" was skipped")]
    UnterminatedStatement { kind: &'static str, name: String },
    #[error("unrecognized definition in table \"{table}\" was skipped: {fragment}")]
    SkippedDefinition { table: String, fragment: String },
    #[error("duplicate table \"{name}\" was skipped")]
    DuplicateTable { name: String },
    #[error("comment on \"{target}\" has no matching table or column")]
    DanglingComment { target: String },
}

/// Strip surrounding double quotes from an identifier.
pub(crate) fn unquote(ident: &str) -> String {
    let trimmed = ident.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

/// Split an optionally schema-qualified identifier into (schema, name),
/// filling in the default schema when unqualified.
pub(crate) fn split_qualified(ident: &str) -> (String, String) {
    match ident.rsplit_once('.') {
        Some((schema, name)) => (unquote(schema), unquote(name)),
        None => (crate::model::DEFAULT_SCHEMA.to_string(), unquote(ident)),
    }
}

/// Like `split_qualified`, but records whether a schema qualifier was
/// actually written, so reference targets can resolve within the right
/// schema.
pub(crate) fn split_reference(ident: &str) -> (Option<String>, String) {
    match ident.rsplit_once('.') {
        Some((schema, name)) => (Some(unquote(schema)), unquote(name)),
        None => (None, unquote(ident)),
    }
}
