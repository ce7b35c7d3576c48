//! Table-level constraint parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::{split_reference, unquote};
use crate::model::{Constraint, ConstraintKind};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^\s*CONSTRAINT\s+("[^"]+"|[A-Za-z_][\w$]*)"#).unwrap());

static LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

static FK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bREFERENCES\s+((?:"[^"]+"|[A-Za-z_][\w$]*)(?:\.(?:"[^"]+"|[A-Za-z_][\w$]*))?)\s*(?:\(([^)]*)\))?"#,
    )
    .unwrap()
});

/// Parse one comma-split fragment as a table-level constraint.
///
/// Kind detection is by substring presence in a fixed priority order:
/// PRIMARY KEY, FOREIGN KEY, UNIQUE, CHECK. The order matters when a
/// CHECK expression textually contains another keyword.
pub fn parse_constraint(fragment: &str) -> Option<Constraint> {
    let upper = fragment.to_ascii_uppercase();

    let kind = if upper.contains("PRIMARY KEY") {
        ConstraintKind::PrimaryKey
    } else if upper.contains("FOREIGN KEY") {
        ConstraintKind::ForeignKey
    } else if upper.contains("UNIQUE") {
        ConstraintKind::Unique
    } else if upper.contains("CHECK") {
        ConstraintKind::Check
    } else {
        return None;
    };

    let name = NAME_RE
        .captures(fragment)
        .map(|c| unquote(c.get(1).unwrap().as_str()))
        .unwrap_or_default();

    // Affected columns come from the first parenthesized list.
    let columns = LIST_RE
        .captures(fragment)
        .map(|c| split_column_list(c.get(1).unwrap().as_str()))
        .unwrap_or_default();

    let mut references_schema = None;
    let mut references_table = None;
    let mut references_columns = Vec::new();

    if kind == ConstraintKind::ForeignKey
        && let Some(caps) = FK_RE.captures(fragment)
    {
        let (schema, table) = split_reference(caps.get(1).unwrap().as_str());
        references_schema = schema;
        references_table = Some(table);
        // Same-name convention applies constraint-wide: an omitted
        // referenced list defaults to the affected columns.
        references_columns = caps
            .get(2)
            .map(|m| split_column_list(m.as_str()))
            .unwrap_or_else(|| columns.clone());
    }

    Some(Constraint {
        name,
        kind,
        columns,
        references_schema,
        references_table,
        references_columns,
    })
}

fn split_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(unquote)
        .filter(|c| !c.is_empty())
        .collect()
}
