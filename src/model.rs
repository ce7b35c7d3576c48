//! Normalized schema model produced by DDL parsing.
//!
//! The model is rebuilt wholesale on every parse and is treated as
//! read-only by the generators. Foreign keys reference their target
//! table by name, resolved by lookup at generation time.

use serde::{Deserialize, Serialize};

/// Schema name used when a DDL identifier is unqualified.
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaModel {
    pub tables: Vec<Table>,
    pub enums: Vec<EnumType>,
}

impl SchemaModel {
    /// Look up a table by unqualified name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Resolve a table reference. A schema qualifier, when present,
    /// must match exactly; otherwise the first bare-name match wins.
    pub fn resolve_table(&self, schema: Option<&str>, name: &str) -> Option<&Table> {
        match schema {
            Some(schema) => self
                .tables
                .iter()
                .find(|t| t.schema == schema && t.name == name),
            None => self.table(name),
        }
    }

    /// Look up an enum by name, accepting an optional schema qualifier.
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        let bare = name.rsplit('.').next().unwrap_or(name);
        self.enums.iter().find(|e| e.name == bare)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub schema: String,
    pub name: String,
    /// Column order matters: it fixes field order in every generated artifact.
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub description: Option<String>,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
            description: None,
        }
    }

    /// Dotted identifier used for comment lookup (`schema.table`).
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Type string as written in the DDL, including array suffix and
    /// parameter lists (`character varying(255)`, `numeric(10,2)`, `text[]`).
    pub raw_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    /// Raw, uninterpreted default expression.
    pub default: Option<String>,
    pub foreign_key: Option<ForeignKeyRef>,
    pub description: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: true,
            primary_key: false,
            default: None,
            foreign_key: None,
            description: None,
        }
    }
}

/// Name-based reference to a column in another table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Present only when the reference was schema-qualified in the DDL.
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Empty for unnamed constraints.
    pub name: String,
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    /// Foreign keys only: target table and referenced columns. When the
    /// DDL omits the referenced column list it defaults to `columns`
    /// (same-name convention).
    pub references_schema: Option<String>,
    pub references_table: Option<String>,
    pub references_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub schema: String,
    pub name: String,
    /// Declared value order is preserved in every generated artifact.
    pub values: Vec<String>,
}
