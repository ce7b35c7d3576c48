//! Generators: schema model to text artifacts.
//!
//! Each generator is a pure, order-preserving function of the model
//! and is independent of the others. Generation is best-effort for
//! unmapped types (the unknown/any sentinel appears in the output) and
//! fails only on structurally broken input: a foreign key whose target
//! table is absent from the model.

mod docs;
mod enums;
mod records;
mod repos;
mod validation;

pub use docs::generate_docs;
pub use enums::generate_enums;
pub use records::generate_records;
pub use repos::generate_repositories;
pub use validation::generate_validation;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::model::{Column, ConstraintKind, SchemaModel};

pub const RECORD_TYPES_FILE: &str = "types.ts";
pub const VALIDATION_FILE: &str = "validation.ts";
pub const REPOSITORIES_FILE: &str = "repos.ts";
pub const ENUMS_FILE: &str = "enums.ts";
pub const DOCS_FILE: &str = "docs.md";

pub(crate) const GENERATED_HEADER: &str = "// Generated by ddlgen. Do not edit.\n";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("foreign key on {table}.{column} references unknown table \"{target}\"")]
    DanglingForeignKey {
        table: String,
        column: String,
        target: String,
    },
}

/// The full artifact set produced from one schema model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifacts {
    pub record_types: String,
    pub validation: String,
    pub repositories: String,
    /// Present only when the model declares at least one enum.
    pub enums: Option<String>,
    pub docs: String,
}

impl Artifacts {
    /// Write every artifact into `dir`, creating it if needed.
    /// Returns the paths written, in a fixed order.
    pub fn write_to(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        let mut write = |name: &str, content: &str| -> io::Result<()> {
            let path = dir.join(name);
            fs::write(&path, content)?;
            written.push(path);
            Ok(())
        };

        write(RECORD_TYPES_FILE, &self.record_types)?;
        write(VALIDATION_FILE, &self.validation)?;
        write(REPOSITORIES_FILE, &self.repositories)?;
        if let Some(enums) = &self.enums {
            write(ENUMS_FILE, enums)?;
        }
        write(DOCS_FILE, &self.docs)?;

        Ok(written)
    }
}

/// Run every generator over the model.
pub fn generate_all(model: &SchemaModel) -> Result<Artifacts, GenerateError> {
    check_model(model)?;

    Ok(Artifacts {
        record_types: generate_records(model),
        validation: generate_validation(model),
        repositories: generate_repositories(model),
        enums: (!model.enums.is_empty()).then(|| generate_enums(model)),
        docs: generate_docs(model),
    })
}

/// Reject models whose foreign keys point at tables that do not exist,
/// naming the offending table and column.
pub fn check_model(model: &SchemaModel) -> Result<(), GenerateError> {
    for table in &model.tables {
        for column in &table.columns {
            if let Some(fk) = &column.foreign_key
                && model.resolve_table(fk.schema.as_deref(), &fk.table).is_none()
            {
                return Err(GenerateError::DanglingForeignKey {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    target: qualified(fk.schema.as_deref(), &fk.table),
                });
            }
        }
        for constraint in &table.constraints {
            if constraint.kind == ConstraintKind::ForeignKey
                && let Some(target) = &constraint.references_table
                && model
                    .resolve_table(constraint.references_schema.as_deref(), target)
                    .is_none()
            {
                return Err(GenerateError::DanglingForeignKey {
                    table: table.name.clone(),
                    column: constraint.columns.first().cloned().unwrap_or_default(),
                    target: qualified(constraint.references_schema.as_deref(), target),
                });
            }
        }
    }
    Ok(())
}

fn qualified(schema: Option<&str>, name: &str) -> String {
    match schema {
        Some(schema) => format!("{}.{}", schema, name),
        None => name.to_string(),
    }
}

/// Column is optional in the insert shape when the database can supply
/// its value: primary keys, defaulted columns, nullable columns.
pub(crate) fn insert_optional(column: &Column) -> bool {
    column.primary_key || column.default.is_some() || column.nullable
}

/// Render a column name as a TypeScript object key, quoting when it is
/// not a plain identifier.
pub(crate) fn property_name(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.chars().next().unwrap().is_ascii_digit()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ForeignKeyRef, Table};

    #[test]
    fn test_check_model_reports_dangling_fk() {
        let mut orders = Table::new("public", "orders");
        let mut col = Column::new("customer_id", "uuid");
        col.foreign_key = Some(ForeignKeyRef {
            schema: None,
            table: "customers".to_string(),
            column: "id".to_string(),
        });
        orders.columns.push(col);

        let model = SchemaModel {
            tables: vec![orders],
            enums: vec![],
        };

        let err = check_model(&model).unwrap_err();
        let GenerateError::DanglingForeignKey { table, column, target } = err;
        assert_eq!(table, "orders");
        assert_eq!(column, "customer_id");
        assert_eq!(target, "customers");
    }

    #[test]
    fn test_qualified_fk_resolves_within_its_schema() {
        let ddl = r#"
            CREATE TABLE archive.users (id uuid PRIMARY KEY);
            CREATE TABLE app.users (id uuid PRIMARY KEY);
            CREATE TABLE app.sessions (user_id uuid NOT NULL REFERENCES app.users(id));
        "#;
        let model = crate::ddl::parse_ddl(ddl).model;
        assert!(check_model(&model).is_ok());
    }

    #[test]
    fn test_qualified_fk_to_missing_schema_is_dangling() {
        let ddl = r#"
            CREATE TABLE users (id uuid PRIMARY KEY);
            CREATE TABLE sessions (user_id uuid REFERENCES auth.users(id));
        "#;
        let model = crate::ddl::parse_ddl(ddl).model;

        let GenerateError::DanglingForeignKey { table, column, target } =
            check_model(&model).unwrap_err();
        assert_eq!(table, "sessions");
        assert_eq!(column, "user_id");
        assert_eq!(target, "auth.users");
    }

    #[test]
    fn test_generate_all_on_empty_model() {
        let artifacts = generate_all(&SchemaModel::default()).unwrap();
        assert!(artifacts.record_types.starts_with(GENERATED_HEADER));
        assert!(artifacts.enums.is_none());
        assert!(!artifacts.docs.is_empty());
    }

    #[test]
    fn test_property_name_quoting() {
        assert_eq!(property_name("id"), "id");
        assert_eq!(property_name("user_id"), "user_id");
        assert_eq!(property_name("1col"), "\"1col\"");
        assert_eq!(property_name("a-b"), "\"a-b\"");
    }

    #[test]
    fn test_write_to_emits_fixed_file_set() {
        let artifacts = generate_all(&SchemaModel::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let written = artifacts.write_to(dir.path()).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["types.ts", "validation.ts", "repos.ts", "docs.md"]);
    }
}
