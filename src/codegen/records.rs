//! Record-type generator: TypeScript row/insert/update shapes.

use heck::ToPascalCase;

use crate::model::SchemaModel;
use crate::types::map_type;

use super::{GENERATED_HEADER, insert_optional, property_name};

const JSON_TYPE: &str = "export type Json =\n  | string\n  | number\n  | boolean\n  | null\n  | { [key: string]: Json }\n  | Json[];\n";

/// Emit row, insert and update interfaces for every table, in model
/// order. Nullable columns widen to `| null`; insert marks primary
/// keys, defaulted and nullable columns optional; update marks every
/// column optional.
pub fn generate_records(model: &SchemaModel) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push('\n');

    let used_enums = enums_in_use(model);
    if !used_enums.is_empty() {
        out.push_str(&format!(
            "import type {{ {} }} from \"./enums\";\n\n",
            used_enums.join(", ")
        ));
    }

    out.push_str(JSON_TYPE);

    for table in &model.tables {
        let pascal = table.name.to_pascal_case();

        out.push_str(&format!("\nexport interface {}Row {{\n", pascal));
        for column in &table.columns {
            let ts = map_type(&column.raw_type, &model.enums).ts_type();
            let suffix = if column.nullable { " | null" } else { "" };
            out.push_str(&format!(
                "  {}: {}{};\n",
                property_name(&column.name),
                ts,
                suffix
            ));
        }
        out.push_str("}\n");

        out.push_str(&format!("\nexport interface {}Insert {{\n", pascal));
        for column in &table.columns {
            let ts = map_type(&column.raw_type, &model.enums).ts_type();
            let optional = if insert_optional(column) { "?" } else { "" };
            let suffix = if column.nullable { " | null" } else { "" };
            out.push_str(&format!(
                "  {}{}: {}{};\n",
                property_name(&column.name),
                optional,
                ts,
                suffix
            ));
        }
        out.push_str("}\n");

        out.push_str(&format!("\nexport interface {}Update {{\n", pascal));
        for column in &table.columns {
            let ts = map_type(&column.raw_type, &model.enums).ts_type();
            let suffix = if column.nullable { " | null" } else { "" };
            out.push_str(&format!(
                "  {}?: {}{};\n",
                property_name(&column.name),
                ts,
                suffix
            ));
        }
        out.push_str("}\n");
    }

    out
}

/// Enum type names referenced by at least one column, in declaration
/// order, as PascalCase TypeScript identifiers.
fn enums_in_use(model: &SchemaModel) -> Vec<String> {
    model
        .enums
        .iter()
        .filter(|e| {
            model.tables.iter().any(|t| {
                t.columns.iter().any(|c| {
                    let bare = c.raw_type.trim_end_matches("[]");
                    let bare = bare.rsplit('.').next().unwrap_or(bare);
                    bare == e.name
                })
            })
        })
        .map(|e| e.name.to_pascal_case())
        .collect()
}
