//! Enum generator: TypeScript union types and value-list constants.

use heck::{ToPascalCase, ToShoutySnakeCase};

use crate::model::SchemaModel;

use super::GENERATED_HEADER;

/// Emit one union type and one `as const` value list per enum, in
/// declaration order. Callers skip this generator when the model has
/// no enums.
pub fn generate_enums(model: &SchemaModel) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);

    for e in &model.enums {
        let pascal = e.name.to_pascal_case();
        let shouty = e.name.to_shouty_snake_case();

        let union = if e.values.is_empty() {
            "never".to_string()
        } else {
            e.values
                .iter()
                .map(|v| format!("\"{}\"", v))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        out.push_str(&format!("\nexport type {} = {};\n", pascal, union));

        let list = e
            .values
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "\nexport const {}_VALUES = [{}] as const;\n",
            shouty, list
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::parse_ddl;

    #[test]
    fn test_enum_union_and_values() {
        let ddl = "CREATE TYPE order_status AS ENUM ('pending','shipped','delivered');";
        let out = generate_enums(&parse_ddl(ddl).model);

        assert!(out.contains(
            "export type OrderStatus = \"pending\" | \"shipped\" | \"delivered\";"
        ));
        assert!(out.contains(
            "export const ORDER_STATUS_VALUES = [\"pending\", \"shipped\", \"delivered\"] as const;"
        ));
    }

    #[test]
    fn test_value_order_is_preserved() {
        let ddl = "CREATE TYPE size AS ENUM ('small','large','medium');";
        let out = generate_enums(&parse_ddl(ddl).model);
        assert!(out.contains("\"small\" | \"large\" | \"medium\""));
    }
}
