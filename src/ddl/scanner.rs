//! Statement scanner for DDL dumps.
//!
//! Statement boundaries are located by anchored keyword patterns; a
//! table or enum body is the text between the keyword match and the
//! next literal `);`. This assumes no `);` occurs inside a default
//! expression, a deliberate simplification. The scan threads its
//! offset explicitly so statements are found exhaustively, in order.

use std::sync::LazyLock;

use regex::Regex;

use super::{Warning, split_qualified};

/// Raw `CREATE TABLE` statement: name plus the text between the outer
/// parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub schema: String,
    pub name: String,
    pub body: String,
}

/// Raw `CREATE TYPE ... AS ENUM` statement with its unparsed value list.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnum {
    pub schema: String,
    pub name: String,
    pub body: String,
}

/// Raw `COMMENT ON TABLE|COLUMN` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct RawComment {
    pub on_column: bool,
    /// Target identifier as written, possibly schema-qualified.
    pub target: String,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct ScanResult {
    pub tables: Vec<RawTable>,
    pub enums: Vec<RawEnum>,
    pub comments: Vec<RawComment>,
    pub warnings: Vec<Warning>,
}

const IDENT: &str = r#"(?:"[^"]+"|[A-Za-z_][\w$]*)"#;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is)\bCREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?({IDENT}(?:\.{IDENT})?)\s*\("
    ))
    .unwrap()
});

static ENUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is)\bCREATE\s+TYPE\s+({IDENT}(?:\.{IDENT})?)\s+AS\s+ENUM\s*\("
    ))
    .unwrap()
});

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is)\bCOMMENT\s+ON\s+(TABLE|COLUMN)\s+({IDENT}(?:\.{IDENT}){{0,2}})\s+IS\s+'((?:[^']|'')*)'"
    ))
    .unwrap()
});

/// Scan the whole DDL text for table, enum and comment statements.
pub fn scan(input: &str) -> ScanResult {
    let mut result = ScanResult::default();
    scan_tables(input, &mut result);
    scan_enums(input, &mut result);
    scan_comments(input, &mut result);
    result
}

fn scan_tables(input: &str, result: &mut ScanResult) {
    let mut offset = 0;
    while let Some(caps) = TABLE_RE.captures_at(input, offset) {
        let full = caps.get(0).unwrap();
        let (schema, name) = split_qualified(caps.get(1).unwrap().as_str());

        match input[full.end()..].find(");") {
            Some(rel) => {
                let body = input[full.end()..full.end() + rel].to_string();
                result.tables.push(RawTable { schema, name, body });
                offset = full.end() + rel + 2;
            }
            None => {
                result.warnings.push(Warning::UnterminatedStatement {
                    kind: "CREATE TABLE",
                    name,
                });
                offset = full.end();
            }
        }
    }
}

fn scan_enums(input: &str, result: &mut ScanResult) {
    let mut offset = 0;
    while let Some(caps) = ENUM_RE.captures_at(input, offset) {
        let full = caps.get(0).unwrap();
        let (schema, name) = split_qualified(caps.get(1).unwrap().as_str());

        match input[full.end()..].find(");") {
            Some(rel) => {
                let body = input[full.end()..full.end() + rel].to_string();
                result.enums.push(RawEnum { schema, name, body });
                offset = full.end() + rel + 2;
            }
            None => {
                result.warnings.push(Warning::UnterminatedStatement {
                    kind: "CREATE TYPE",
                    name,
                });
                offset = full.end();
            }
        }
    }
}

fn scan_comments(input: &str, result: &mut ScanResult) {
    let mut offset = 0;
    while let Some(caps) = COMMENT_RE.captures_at(input, offset) {
        let full = caps.get(0).unwrap();
        result.comments.push(RawComment {
            on_column: caps.get(1).unwrap().as_str().eq_ignore_ascii_case("COLUMN"),
            target: caps.get(2).unwrap().as_str().to_string(),
            text: caps.get(3).unwrap().as_str().replace("''", "'"),
        });
        offset = full.end();
    }
}
