//! Raw database type mapping.
//!
//! Two parallel mappings are derived from a column's raw type string:
//! a semantic target type (rendered as TypeScript) and a validation
//! rule (rendered as a zod schema). Unmapped types never fail; they
//! resolve to an explicit unknown/any sentinel.

use heck::ToPascalCase;
use serde::Serialize;

use crate::model::{Column, EnumType};

/// Target-language semantic type for a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SemanticType {
    Number,
    Boolean,
    Text,
    /// Timestamps, dates and intervals travel as ISO strings.
    Timestamp,
    /// `bytea`, transported as an encoded string.
    Binary,
    Json,
    Uuid,
    /// inet/cidr/macaddr, transported as strings.
    Inet,
    /// Named enum type; values live in the schema model.
    Enum(String),
    Array(Box<SemanticType>),
    /// Sentinel for types with no mapping rule.
    Unknown,
}

impl SemanticType {
    /// Render as a TypeScript type expression.
    pub fn ts_type(&self) -> String {
        match self {
            Self::Number => "number".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Text | Self::Timestamp | Self::Binary | Self::Uuid | Self::Inet => {
                "string".to_string()
            }
            Self::Json => "Json".to_string(),
            Self::Enum(name) => name.to_pascal_case(),
            Self::Array(inner) => format!("{}[]", inner.ts_type()),
            Self::Unknown => "any".to_string(),
        }
    }
}

/// Map a raw type string to its semantic type.
///
/// Rules in order: array suffix recurses on the element type; a name
/// matching a declared enum (optionally schema-qualified) becomes that
/// enum; otherwise the parameter suffix is stripped and a fixed table
/// consulted. Anything else is `Unknown`.
pub fn map_type(raw_type: &str, enums: &[EnumType]) -> SemanticType {
    let trimmed = raw_type.trim();

    if let Some(element) = trimmed.strip_suffix("[]") {
        return SemanticType::Array(Box::new(map_type(element, enums)));
    }

    let bare = trimmed.rsplit('.').next().unwrap_or(trimmed);
    if let Some(e) = enums.iter().find(|e| e.name == bare) {
        return SemanticType::Enum(e.name.clone());
    }

    let base = trimmed
        .split('(')
        .next()
        .unwrap_or(trimmed)
        .trim()
        .to_lowercase();

    match base.as_str() {
        "smallint" | "int2" | "integer" | "int" | "int4" | "bigint" | "int8" | "serial"
        | "serial2" | "serial4" | "serial8" | "smallserial" | "bigserial" | "numeric"
        | "decimal" | "real" | "float4" | "double precision" | "float8" | "money" => {
            SemanticType::Number
        }
        "boolean" | "bool" => SemanticType::Boolean,
        "text" | "varchar" | "character varying" | "character" | "char" | "citext" | "name" => {
            SemanticType::Text
        }
        "timestamp" | "timestamptz" | "timestamp with time zone"
        | "timestamp without time zone" | "date" | "time" | "timetz" | "time with time zone"
        | "time without time zone" | "interval" => SemanticType::Timestamp,
        "bytea" => SemanticType::Binary,
        "json" | "jsonb" => SemanticType::Json,
        "uuid" => SemanticType::Uuid,
        "inet" | "cidr" | "macaddr" | "macaddr8" => SemanticType::Inet,
        _ => SemanticType::Unknown,
    }
}

/// Validation-rule descriptor for a column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationRule {
    Number,
    String,
    Boolean,
    /// Membership check against the verbatim enum value list.
    EnumMembership(Vec<String>),
    Json,
    Binary,
    Unknown,
    Array(Box<ValidationRule>),
    Nullable(Box<ValidationRule>),
}

impl ValidationRule {
    /// Render as a zod schema expression.
    pub fn zod_schema(&self) -> String {
        match self {
            Self::Number => "z.number()".to_string(),
            Self::String | Self::Binary => "z.string()".to_string(),
            Self::Boolean => "z.boolean()".to_string(),
            Self::EnumMembership(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("z.enum([{}])", quoted.join(", "))
            }
            Self::Json => "z.unknown()".to_string(),
            Self::Unknown => "z.any()".to_string(),
            Self::Array(inner) => format!("z.array({})", inner.zod_schema()),
            Self::Nullable(inner) => format!("{}.nullable()", inner.zod_schema()),
        }
    }
}

/// Build the validation rule for a column, wrapping arrays first and
/// nullability outermost (a nullable `text[]` is a nullable sequence
/// of text, not a sequence of nullable text).
pub fn validation_rule(column: &Column, enums: &[EnumType]) -> ValidationRule {
    let rule = rule_for(&map_type(&column.raw_type, enums), enums);
    if column.nullable {
        ValidationRule::Nullable(Box::new(rule))
    } else {
        rule
    }
}

fn rule_for(semantic: &SemanticType, enums: &[EnumType]) -> ValidationRule {
    match semantic {
        SemanticType::Number => ValidationRule::Number,
        SemanticType::Boolean => ValidationRule::Boolean,
        SemanticType::Text | SemanticType::Timestamp | SemanticType::Uuid | SemanticType::Inet => {
            ValidationRule::String
        }
        SemanticType::Binary => ValidationRule::Binary,
        SemanticType::Json => ValidationRule::Json,
        SemanticType::Enum(name) => {
            let values = enums
                .iter()
                .find(|e| &e.name == name)
                .map(|e| e.values.clone())
                .unwrap_or_default();
            ValidationRule::EnumMembership(values)
        }
        SemanticType::Array(inner) => ValidationRule::Array(Box::new(rule_for(inner, enums))),
        SemanticType::Unknown => ValidationRule::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_enum() -> Vec<EnumType> {
        vec![EnumType {
            schema: "public".to_string(),
            name: "order_status".to_string(),
            values: vec!["pending".to_string(), "shipped".to_string()],
        }]
    }

    #[test]
    fn test_map_scalar_types() {
        assert_eq!(map_type("integer", &[]), SemanticType::Number);
        assert_eq!(map_type("numeric(10,2)", &[]), SemanticType::Number);
        assert_eq!(map_type("character varying(255)", &[]), SemanticType::Text);
        assert_eq!(map_type("TIMESTAMPTZ", &[]), SemanticType::Timestamp);
        assert_eq!(map_type("jsonb", &[]), SemanticType::Json);
        assert_eq!(map_type("uuid", &[]), SemanticType::Uuid);
        assert_eq!(map_type("bytea", &[]), SemanticType::Binary);
        assert_eq!(map_type("inet", &[]), SemanticType::Inet);
    }

    #[test]
    fn test_unmapped_type_is_unknown_sentinel() {
        assert_eq!(map_type("tsvector", &[]), SemanticType::Unknown);
        assert_eq!(SemanticType::Unknown.ts_type(), "any");
    }

    #[test]
    fn test_array_composition() {
        assert_eq!(
            map_type("text[]", &[]),
            SemanticType::Array(Box::new(SemanticType::Text))
        );
        assert_eq!(map_type("text[]", &[]).ts_type(), "string[]");
    }

    #[test]
    fn test_enum_match_with_and_without_schema() {
        let enums = status_enum();
        assert_eq!(
            map_type("order_status", &enums),
            SemanticType::Enum("order_status".to_string())
        );
        assert_eq!(
            map_type("public.order_status", &enums),
            SemanticType::Enum("order_status".to_string())
        );
        assert_eq!(map_type("order_status", &enums).ts_type(), "OrderStatus");
    }

    #[test]
    fn test_nullable_array_rule_wraps_outermost() {
        let mut col = Column::new("tags", "text[]");
        col.nullable = true;
        assert_eq!(
            validation_rule(&col, &[]).zod_schema(),
            "z.array(z.string()).nullable()"
        );
    }

    #[test]
    fn test_enum_membership_rule_lists_values_verbatim() {
        let enums = status_enum();
        let mut col = Column::new("status", "order_status");
        col.nullable = false;
        assert_eq!(
            validation_rule(&col, &enums).zod_schema(),
            "z.enum([\"pending\", \"shipped\"])"
        );
    }

    #[test]
    fn test_unknown_rule_renders_any() {
        let mut col = Column::new("search", "tsvector");
        col.nullable = false;
        assert_eq!(validation_rule(&col, &[]).zod_schema(), "z.any()");
    }
}
