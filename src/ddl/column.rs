//! Single column definition parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::{split_reference, unquote};
use crate::model::{Column, ForeignKeyRef};

static HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?isx)
        ^\s*
        ("[^"]+"|[A-Za-z_][\w$]*)          # column name
        \s+
        (                                   # type, possibly multi-word
            (?: character\s+varying
              | bit\s+varying
              | double\s+precision
              | (?:timestamp|time)(?:\s*\(\d+\))?\s+with(?:out)?\s+time\s+zone
              | [A-Za-z_][\w$]*(?:\.[A-Za-z_][\w$]*)?
            )
            (?:\s*\([^)]*\))?               # parameter list
            (?:\s*\[\s*\])*                 # array suffix
        )
        (.*)$                               # modifier tail
        "#,
    )
    .unwrap()
});

static PK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\b").unwrap());

static DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bDEFAULT\s+(.+)$").unwrap());

static FK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bREFERENCES\s+((?:"[^"]+"|[A-Za-z_][\w$]*)(?:\.(?:"[^"]+"|[A-Za-z_][\w$]*))?)\s*(?:\(\s*("[^"]+"|[A-Za-z_][\w$]*)\s*\))?"#,
    )
    .unwrap()
});

/// Parse one comma-split fragment as a column definition.
///
/// Returns `None` when the fragment does not match the expected
/// `name type [modifiers]` shape. Modifier clauses (`NOT NULL`,
/// `PRIMARY KEY`, `DEFAULT`, `REFERENCES`) are each matched
/// independently against the whole tail, so their relative order in
/// the source is irrelevant.
pub fn parse_column(fragment: &str) -> Option<Column> {
    let caps = HEAD_RE.captures(fragment)?;
    let name = unquote(caps.get(1).unwrap().as_str());
    let raw_type = normalize_type(caps.get(2).unwrap().as_str());
    let tail = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    let mut column = Column::new(name, raw_type);

    // Literal substring test, matching the tolerant source behavior.
    column.nullable = !tail.to_ascii_uppercase().contains("NOT NULL");

    column.primary_key = PK_RE.is_match(tail);

    // The fragment is already comma-split, so the default expression is
    // simply the rest of the tail after DEFAULT.
    if let Some(m) = DEFAULT_RE.captures(tail) {
        column.default = Some(m.get(1).unwrap().as_str().trim().to_string());
    }

    if let Some(m) = FK_RE.captures(tail) {
        let (schema, table) = split_reference(m.get(1).unwrap().as_str());
        // Same-name convention: an omitted target column defaults to the
        // referencing column's own name.
        let target_column = m
            .get(2)
            .map(|c| unquote(c.as_str()))
            .unwrap_or_else(|| column.name.clone());
        column.foreign_key = Some(ForeignKeyRef {
            schema,
            table,
            column: target_column,
        });
    }

    Some(column)
}

/// Collapse internal whitespace runs so `character   varying (255)`
/// and `character varying(255)` normalize identically.
fn normalize_type(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_space = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            last_space = true;
            continue;
        }
        if last_space && !out.is_empty() && !matches!(ch, '(' | '[' | ')' | ']') {
            out.push(' ');
        }
        last_space = false;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_column() {
        let col = parse_column("id uuid").unwrap();
        assert_eq!(col.name, "id");
        assert_eq!(col.raw_type, "uuid");
        assert!(col.nullable);
        assert!(!col.primary_key);
        assert!(col.default.is_none());
        assert!(col.foreign_key.is_none());
    }

    #[test]
    fn test_parse_not_null_and_pk() {
        let col = parse_column("id uuid PRIMARY KEY").unwrap();
        assert!(col.primary_key);
        // PK does not imply NOT NULL here; nullability tracks the
        // explicit modifier only.
        assert!(col.nullable);

        let col = parse_column("name text NOT NULL").unwrap();
        assert!(!col.nullable);
        assert!(!col.primary_key);
    }

    #[test]
    fn test_parse_multiword_types() {
        let col = parse_column("title character varying(255) NOT NULL").unwrap();
        assert_eq!(col.raw_type, "character varying(255)");

        let col = parse_column("ratio double precision").unwrap();
        assert_eq!(col.raw_type, "double precision");

        let col = parse_column("created_at timestamp with time zone DEFAULT now()").unwrap();
        assert_eq!(col.raw_type, "timestamp with time zone");
        assert_eq!(col.default.as_deref(), Some("now()"));
    }

    #[test]
    fn test_parse_array_type() {
        let col = parse_column("tags text[]").unwrap();
        assert_eq!(col.raw_type, "text[]");
    }

    #[test]
    fn test_array_suffix_with_inner_space_normalizes() {
        let col = parse_column("tags text[ ]").unwrap();
        assert_eq!(col.raw_type, "text[]");

        let col = parse_column("scores integer [ ]").unwrap();
        assert_eq!(col.raw_type, "integer[]");
    }

    #[test]
    fn test_parse_default_reads_rest_of_tail() {
        let col = parse_column("price numeric(10,2) DEFAULT 0.00").unwrap();
        assert_eq!(col.raw_type, "numeric(10,2)");
        assert_eq!(col.default.as_deref(), Some("0.00"));
    }

    #[test]
    fn test_parse_inline_reference() {
        let col = parse_column("customer_id uuid REFERENCES customers(id)").unwrap();
        let fk = col.foreign_key.unwrap();
        assert_eq!(fk.schema, None);
        assert_eq!(fk.table, "customers");
        assert_eq!(fk.column, "id");
    }

    #[test]
    fn test_qualified_reference_keeps_schema() {
        let col = parse_column("invoice_id uuid REFERENCES billing.invoices(id)").unwrap();
        let fk = col.foreign_key.unwrap();
        assert_eq!(fk.schema.as_deref(), Some("billing"));
        assert_eq!(fk.table, "invoices");
    }

    #[test]
    fn test_inline_reference_same_name_convention() {
        let col = parse_column("tenant_id uuid REFERENCES tenants").unwrap();
        let fk = col.foreign_key.unwrap();
        assert_eq!(fk.table, "tenants");
        assert_eq!(fk.column, "tenant_id");
    }

    #[test]
    fn test_modifier_order_is_irrelevant() {
        let a = parse_column("status text DEFAULT 'new' NOT NULL").unwrap();
        let b = parse_column("status text NOT NULL DEFAULT 'new'").unwrap();
        assert!(!a.nullable);
        assert!(!b.nullable);
        assert_eq!(b.default.as_deref(), Some("'new'"));
        // The default expression is the rest of the tail after DEFAULT,
        // so trailing clauses ride along.
        assert_eq!(a.default.as_deref(), Some("'new' NOT NULL"));
    }

    #[test]
    fn test_quoted_identifier() {
        let col = parse_column("\"userId\" uuid NOT NULL").unwrap();
        assert_eq!(col.name, "userId");
    }

    #[test]
    fn test_garbage_fragment_returns_none() {
        assert!(parse_column("   ").is_none());
        assert!(parse_column("justoneword").is_none());
    }
}
