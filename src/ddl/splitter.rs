//! Depth-aware splitting of a table body into definitions.

/// Split the text between a table's outer parentheses into one fragment
/// per column or table-level constraint.
///
/// A single left-to-right scan tracks paren/bracket nesting; commas are
/// split points only at depth zero, so `numeric(10,2)`, `text[]` and
/// parenthesized constraint column lists stay intact. Commas inside
/// quoted string literals are not recognized (known limitation).
pub fn split_definitions(body: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for ch in body.chars() {
        match ch {
            '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                let fragment = current.trim();
                if !fragment.is_empty() {
                    fragments.push(fragment.to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    let fragment = current.trim();
    if !fragment.is_empty() {
        fragments.push(fragment.to_string());
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_columns() {
        let body = "id uuid, name text, created_at timestamptz";
        assert_eq!(
            split_definitions(body),
            vec!["id uuid", "name text", "created_at timestamptz"]
        );
    }

    #[test]
    fn test_split_respects_numeric_precision() {
        let body = "id uuid, price numeric(10,2), qty int";
        assert_eq!(
            split_definitions(body),
            vec!["id uuid", "price numeric(10,2)", "qty int"]
        );
    }

    #[test]
    fn test_split_respects_constraint_column_lists() {
        let body = "a int, b int, CONSTRAINT pk PRIMARY KEY (a, b)";
        assert_eq!(
            split_definitions(body),
            vec!["a int", "b int", "CONSTRAINT pk PRIMARY KEY (a, b)"]
        );
    }

    #[test]
    fn test_split_respects_array_brackets() {
        let body = "tags text[], scores integer[]";
        assert_eq!(split_definitions(body), vec!["tags text[]", "scores integer[]"]);
    }

    #[test]
    fn test_rejoin_preserves_content() {
        // Splitting never drops or duplicates characters beyond whitespace.
        let body = "id uuid,\n    price numeric(10,2),\n    CONSTRAINT u UNIQUE (id)";
        let rejoined = split_definitions(body).join(",");
        let normalize = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        assert_eq!(normalize(&rejoined), normalize(body));
    }

    #[test]
    fn test_empty_body() {
        assert!(split_definitions("").is_empty());
        assert!(split_definitions("  \n ").is_empty());
    }
}
