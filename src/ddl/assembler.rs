//! Schema assembly: merges scanned statements into the final model.

use std::sync::LazyLock;

use regex::Regex;

use super::comment::CommentMap;
use super::scanner::{self, RawEnum, RawTable};
use super::{Warning, parse_column, parse_constraint, split_definitions};
use crate::model::{ConstraintKind, EnumType, ForeignKeyRef, SchemaModel, Table};

/// Result of parsing a DDL dump: the assembled model plus every
/// non-fatal condition encountered along the way.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub model: SchemaModel,
    pub warnings: Vec<Warning>,
}

/// Parse a DDL text blob into a schema model.
///
/// Best-effort: malformed statements are skipped and reported in
/// `warnings`, never surfaced as errors. Empty input yields an empty
/// model.
pub fn parse_ddl(input: &str) -> ParseOutcome {
    let scan = scanner::scan(input);
    let mut outcome = ParseOutcome {
        warnings: scan.warnings,
        ..Default::default()
    };

    for raw in &scan.tables {
        if let Some(table) = assemble_table(raw, &mut outcome.warnings) {
            let duplicate = outcome
                .model
                .tables
                .iter()
                .any(|t| t.schema == table.schema && t.name == table.name);
            if duplicate {
                outcome.warnings.push(Warning::DuplicateTable {
                    name: table.qualified_name(),
                });
            } else {
                outcome.model.tables.push(table);
            }
        }
    }

    for raw in &scan.enums {
        outcome.model.enums.push(assemble_enum(raw));
    }

    for table in &mut outcome.model.tables {
        promote_primary_keys(table);
        promote_foreign_keys(table);
    }

    attach_comments(
        &mut outcome.model,
        &CommentMap::from_raw(&scan.comments),
        &mut outcome.warnings,
    );

    tracing::debug!(
        tables = outcome.model.tables.len(),
        enums = outcome.model.enums.len(),
        warnings = outcome.warnings.len(),
        "assembled schema model"
    );

    outcome
}

fn assemble_table(raw: &RawTable, warnings: &mut Vec<Warning>) -> Option<Table> {
    let mut table = Table::new(raw.schema.clone(), raw.name.clone());

    for fragment in split_definitions(&raw.body) {
        if is_constraint_fragment(&fragment) {
            match parse_constraint(&fragment) {
                Some(constraint) => table.constraints.push(constraint),
                None => warnings.push(Warning::SkippedDefinition {
                    table: table.name.clone(),
                    fragment,
                }),
            }
        } else {
            match parse_column(&fragment) {
                Some(column) => table.columns.push(column),
                None => warnings.push(Warning::SkippedDefinition {
                    table: table.name.clone(),
                    fragment,
                }),
            }
        }
    }

    Some(table)
}

// The boundary keeps columns whose names merely begin with a keyword
// (checksum, unique_id) on the column path.
static CONSTRAINT_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:CONSTRAINT|PRIMARY\s+KEY|FOREIGN\s+KEY|UNIQUE|CHECK)\b").unwrap()
});

fn is_constraint_fragment(fragment: &str) -> bool {
    CONSTRAINT_HEAD_RE.is_match(fragment)
}

fn assemble_enum(raw: &RawEnum) -> EnumType {
    let values = split_definitions(&raw.body)
        .iter()
        .map(|v| unquote_enum_value(v))
        .collect();

    EnumType {
        schema: raw.schema.clone(),
        name: raw.name.clone(),
        values,
    }
}

/// Strip surrounding single quotes and unescape `\'` and `''`.
fn unquote_enum_value(value: &str) -> String {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(trimmed);
    inner.replace("\\'", "'").replace("''", "'")
}

/// Mark every column named in a table-level PRIMARY KEY constraint.
/// Idempotent over already-flagged columns.
fn promote_primary_keys(table: &mut Table) {
    let pk_columns: Vec<String> = table
        .constraints
        .iter()
        .filter(|c| c.kind == ConstraintKind::PrimaryKey)
        .flat_map(|c| c.columns.iter().cloned())
        .collect();

    for name in pk_columns {
        if let Some(column) = table.column_mut(&name) {
            column.primary_key = true;
        }
    }
}

/// Attach constraint-declared foreign keys to their columns, pairing
/// affected and referenced columns positionally. Inline `REFERENCES`
/// clauses take precedence (first-write-wins).
fn promote_foreign_keys(table: &mut Table) {
    let fk_pairs: Vec<(String, ForeignKeyRef)> = table
        .constraints
        .iter()
        .filter(|c| c.kind == ConstraintKind::ForeignKey)
        .filter_map(|c| c.references_table.as_ref().map(|t| (c, t)))
        .flat_map(|(c, target)| {
            c.columns.iter().enumerate().map(|(i, col)| {
                // Same-name convention covers a missing or short
                // referenced-column list.
                let referenced = c
                    .references_columns
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| col.clone());
                (
                    col.clone(),
                    ForeignKeyRef {
                        schema: c.references_schema.clone(),
                        table: target.clone(),
                        column: referenced,
                    },
                )
            })
        })
        .collect();

    for (name, fk) in fk_pairs {
        if let Some(column) = table.column_mut(&name)
            && column.foreign_key.is_none()
        {
            column.foreign_key = Some(fk);
        }
    }
}

fn attach_comments(model: &mut SchemaModel, comments: &CommentMap, warnings: &mut Vec<Warning>) {
    let mut used: Vec<String> = Vec::new();

    for table in &mut model.tables {
        let table_key = table.qualified_name();
        if let Some(text) = comments.get(&table_key) {
            table.description = Some(text.to_string());
            used.push(table_key.clone());
        }
        for column in &mut table.columns {
            let column_key = format!("{}.{}", table_key, column.name);
            if let Some(text) = comments.get(&column_key) {
                column.description = Some(text.to_string());
                used.push(column_key);
            }
        }
    }

    for key in comments.keys() {
        if !used.iter().any(|u| u == key) {
            warnings.push(Warning::DanglingComment {
                target: key.to_string(),
            });
        }
    }
}
