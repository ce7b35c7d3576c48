//! `COMMENT ON` extraction into a fully-qualified lookup map.

use std::collections::HashMap;

use super::scanner::RawComment;
use super::unquote;
use crate::model::DEFAULT_SCHEMA;

/// Descriptions keyed by dotted identifier: `schema.table` for table
/// comments, `schema.table.column` for column comments.
#[derive(Debug, Default)]
pub struct CommentMap {
    entries: HashMap<String, String>,
}

impl CommentMap {
    pub fn from_raw(comments: &[RawComment]) -> Self {
        let mut entries = HashMap::new();
        for comment in comments {
            if let Some(key) = normalize_target(&comment.target, comment.on_column) {
                entries.insert(key, comment.text.clone());
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// All normalized target keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Unquote each path segment and prefix the default schema when the
/// target is unqualified. Targets with the wrong number of segments
/// for their statement kind are dropped.
fn normalize_target(target: &str, on_column: bool) -> Option<String> {
    let parts: Vec<String> = target.split('.').map(unquote).collect();
    let expected = if on_column { 3 } else { 2 };

    match parts.len() {
        n if n == expected => Some(parts.join(".")),
        n if n + 1 == expected => Some(format!("{}.{}", DEFAULT_SCHEMA, parts.join("."))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(on_column: bool, target: &str, text: &str) -> RawComment {
        RawComment {
            on_column,
            target: target.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_table_comment_keys() {
        let map = CommentMap::from_raw(&[
            raw(false, "public.orders", "customer orders"),
            raw(false, "tenants", "tenant accounts"),
        ]);

        assert_eq!(map.get("public.orders"), Some("customer orders"));
        assert_eq!(map.get("public.tenants"), Some("tenant accounts"));
    }

    #[test]
    fn test_column_comment_keys() {
        let map = CommentMap::from_raw(&[
            raw(true, "public.orders.status", "order lifecycle state"),
            raw(true, "orders.total", "grand total"),
        ]);

        assert_eq!(map.get("public.orders.status"), Some("order lifecycle state"));
        assert_eq!(map.get("public.orders.total"), Some("grand total"));
    }

    #[test]
    fn test_quoted_segments_are_unquoted() {
        let map = CommentMap::from_raw(&[raw(true, "\"public\".\"Order\".\"userId\"", "owner")]);
        assert_eq!(map.get("public.Order.userId"), Some("owner"));
    }

    #[test]
    fn test_malformed_target_is_dropped() {
        let map = CommentMap::from_raw(&[raw(true, "a.b.c.d", "too deep")]);
        assert!(map.keys().next().is_none());
    }
}
