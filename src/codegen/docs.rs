//! Documentation generator: relationship diagram and table reference.

use crate::model::{Column, SchemaModel, Table};

/// Emit a markdown document with a mermaid `erDiagram` and a
/// table-by-table column reference, in model order.
pub fn generate_docs(model: &SchemaModel) -> String {
    let mut out = String::new();
    out.push_str("<!-- Generated by ddlgen. Do not edit. -->\n\n");
    out.push_str("# Schema Reference\n\n");

    out.push_str("## Relationships\n\n");
    out.push_str("```mermaid\nerDiagram\n");
    for table in &model.tables {
        emit_node(&mut out, table);
    }
    for table in &model.tables {
        for column in &table.columns {
            if let Some(fk) = &column.foreign_key {
                // Edge cardinality follows the referencing column's
                // nullability: optional-to-many when nullable.
                let edge = if column.nullable { "|o--o{" } else { "||--o{" };
                out.push_str(&format!(
                    "    {} {} {} : \"{}\"\n",
                    fk.table, edge, table.name, column.name
                ));
            }
        }
    }
    out.push_str("```\n");

    out.push_str("\n## Tables\n");
    if model.tables.is_empty() {
        out.push_str("\n_No tables._\n");
    }
    for table in &model.tables {
        emit_reference(&mut out, table);
    }

    out
}

fn emit_node(out: &mut String, table: &Table) {
    out.push_str(&format!("    {} {{\n", table.name));
    for column in &table.columns {
        let mut keys = Vec::new();
        if column.primary_key {
            keys.push("PK");
        }
        if column.foreign_key.is_some() {
            keys.push("FK");
        }

        out.push_str(&format!(
            "        {} {}",
            mermaid_type(&column.raw_type),
            column.name
        ));
        if !keys.is_empty() {
            out.push_str(&format!(" {}", keys.join(", ")));
        }
        if column.nullable {
            out.push_str(" \"nullable\"");
        }
        out.push('\n');
    }
    out.push_str("    }\n");
}

/// Mermaid attribute types cannot contain spaces or parentheses.
fn mermaid_type(raw_type: &str) -> String {
    let base = raw_type.split('(').next().unwrap_or(raw_type).trim();
    if let Some(element) = base.strip_suffix("[]") {
        format!("{}_array", element.trim().replace(' ', "_"))
    } else {
        base.replace(' ', "_")
    }
}

fn emit_reference(out: &mut String, table: &Table) {
    out.push_str(&format!("\n### {}\n\n", table.name));
    if let Some(description) = &table.description {
        out.push_str(&format!("{}\n\n", description));
    }

    out.push_str("| Column | Type | Nullable | Primary key | Default | Description |\n");
    out.push_str("| --- | --- | --- | --- | --- | --- |\n");
    for column in &table.columns {
        out.push_str(&format!(
            "| {} | `{}` | {} | {} | {} | {} |\n",
            column.name,
            column.raw_type,
            yes_no(column.nullable),
            yes_no(column.primary_key),
            column
                .default
                .as_deref()
                .map(|d| format!("`{}`", cell(d)))
                .unwrap_or_default(),
            cell(column.description.as_deref().unwrap_or("")),
        ));
    }

    let fk_lines: Vec<String> = table
        .columns
        .iter()
        .filter_map(|c| fk_line(c))
        .collect();
    if !fk_lines.is_empty() {
        out.push('\n');
        for line in fk_lines {
            out.push_str(&line);
        }
    }
}

fn fk_line(column: &Column) -> Option<String> {
    let fk = column.foreign_key.as_ref()?;
    Some(format!(
        "- `{}` references `{}.{}`\n",
        column.name, fk.table, fk.column
    ))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Escape pipes so free text cannot break the markdown table.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
