//! Read access to persisted call documents
//!
//! The store hands us a tree of nodes. Builders only need a handful of
//! navigation and scalar operations, captured by [`DocumentNode`], so the
//! restore logic does not care which parser produced the tree.

use serde_json::Value;

use crate::error::Result;

/// Navigation and typed scalar access over one node of a document tree.
///
/// Scalar getters return `None` when the field is absent or cannot be read
/// as the requested type; builders decide whether that is an error.
pub trait DocumentNode {
    /// Enter the named member of an object node
    fn member(&self, name: &str) -> Option<&Self>;

    /// The node interpreted as an integer
    fn as_int(&self) -> Option<i64>;

    /// The node interpreted as a string
    fn as_string(&self) -> Option<String>;

    /// Whether this node is an array
    fn is_array(&self) -> bool;

    /// Number of elements of an array node, 0 for anything else
    fn len(&self) -> usize;

    /// Element `idx` of an array node
    fn element(&self, idx: usize) -> Option<&Self>;

    /// Integer value of the named member
    fn int(&self, name: &str) -> Option<i64> {
        self.member(name).and_then(|node| node.as_int())
    }

    /// String value of the named member
    fn string(&self, name: &str) -> Option<String> {
        self.member(name).and_then(|node| node.as_string())
    }
}

impl DocumentNode for Value {
    fn member(&self, name: &str) -> Option<&Self> {
        self.as_object().and_then(|obj| obj.get(name))
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            // The store keeps most scalars as strings
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    fn as_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    fn len(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }

    fn element(&self, idx: usize) -> Option<&Self> {
        self.as_array().and_then(|arr| arr.get(idx))
    }
}

/// Parse the raw text fetched from the store into a document tree
pub fn parse_document(raw: &str) -> Result<Value> {
    Ok(serde_json::from_str(raw)?)
}

/// Name of the `idx`-th entry of a numbered list, e.g. `tag-3`
pub(crate) fn indexed(prefix: &str, idx: usize) -> String {
    format!("{}-{}", prefix, idx)
}

/// Unique id of the entry found at list position `idx`
pub(crate) fn unique_id(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

/// Walk a numbered list: `<prefix>-0`, `<prefix>-1`, ... until the
/// first missing index. Entries after a gap are never visited.
pub(crate) fn scan<'a, N: DocumentNode>(
    root: &'a N,
    prefix: &'a str,
) -> impl Iterator<Item = (usize, &'a N)> + 'a {
    (0..).map_while(move |idx| root.member(&indexed(prefix, idx)).map(|node| (idx, node)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_coercions() {
        let doc = json!({
            "num": 42,
            "text_num": " 17 ",
            "flag": true,
            "neg": -1,
            "float": 1.5,
            "word": "abc",
            "nested": {"a": 1},
        });

        assert_eq!(doc.int("num"), Some(42));
        assert_eq!(doc.int("text_num"), Some(17));
        assert_eq!(doc.int("flag"), Some(1));
        assert_eq!(doc.int("neg"), Some(-1));
        assert_eq!(doc.int("float"), None);
        assert_eq!(doc.int("word"), None);
        assert_eq!(doc.int("nested"), None);
        assert_eq!(doc.int("absent"), None);

        assert_eq!(doc.string("word").as_deref(), Some("abc"));
        assert_eq!(doc.string("num").as_deref(), Some("42"));
        assert_eq!(doc.string("nested"), None);
        assert_eq!(doc.string("absent"), None);
    }

    #[test]
    fn test_array_access() {
        let doc = json!({"list": [1, "2", 3], "obj": {}});
        let list = doc.member("list").unwrap();
        assert!(list.is_array());
        assert_eq!(list.len(), 3);
        assert_eq!(list.element(1).and_then(|e| e.as_int()), Some(2));
        assert!(list.element(3).is_none());

        let obj = doc.member("obj").unwrap();
        assert!(!obj.is_array());
        assert_eq!(obj.len(), 0);
    }

    #[test]
    fn test_scan_stops_at_first_gap() {
        let doc = json!({"x-0": 0, "x-1": 1, "x-3": 3});
        let found: Vec<usize> = scan(&doc, "x").map(|(idx, _)| idx).collect();
        assert_eq!(found, vec![0, 1]);
    }

    #[test]
    fn test_parse_document_rejects_garbage() {
        assert!(parse_document("{\"json\": {}}").is_ok());
        assert!(parse_document("not json").is_err());
    }
}
