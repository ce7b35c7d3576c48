//! Validation-schema generator: zod schemas per table.

use heck::ToLowerCamelCase;

use crate::model::{SchemaModel, Table};
use crate::types::validation_rule;

use super::{GENERATED_HEADER, insert_optional, property_name};

/// Emit row/insert/update zod object schemas for every table, built
/// from the per-column validation rules and mirroring the record-type
/// generator's optionality.
pub fn generate_validation(model: &SchemaModel) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push('\n');
    out.push_str("import { z } from \"zod\";\n");

    for table in &model.tables {
        let camel = table.name.to_lower_camel_case();

        emit_schema(&mut out, model, table, &camel, Shape::Row);
        emit_schema(&mut out, model, table, &camel, Shape::Insert);
        emit_schema(&mut out, model, table, &camel, Shape::Update);
    }

    out
}

#[derive(Clone, Copy)]
enum Shape {
    Row,
    Insert,
    Update,
}

impl Shape {
    fn suffix(self) -> &'static str {
        match self {
            Self::Row => "Row",
            Self::Insert => "Insert",
            Self::Update => "Update",
        }
    }
}

fn emit_schema(out: &mut String, model: &SchemaModel, table: &Table, camel: &str, shape: Shape) {
    out.push_str(&format!(
        "\nexport const {}{}Schema = z.object({{\n",
        camel,
        shape.suffix()
    ));

    for column in &table.columns {
        let mut schema = validation_rule(column, &model.enums).zod_schema();
        let optional = match shape {
            Shape::Row => false,
            Shape::Insert => insert_optional(column),
            Shape::Update => true,
        };
        if optional {
            schema.push_str(".optional()");
        }
        out.push_str(&format!("  {}: {},\n", property_name(&column.name), schema));
    }

    out.push_str("});\n");
}
