use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static PATH_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]|[^.\[\]]+").unwrap());

/// Walk a binding path like `Api1.data[0].name` over the data tree.
/// Dots descend into objects, `[n]` indexes into arrays. Returns `None` as
/// soon as any segment is missing or has the wrong shape.
pub fn resolve_path(tree: &Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = tree;
    for caps in PATH_SEGMENT_RE.captures_iter(path) {
        current = match caps.get(1) {
            Some(index) => {
                let i: usize = index.as_str().parse().ok()?;
                current.as_array()?.get(i)?
            }
            None => current.as_object()?.get(caps.get(0)?.as_str())?,
        };
    }
    Some(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Value {
        json!({
            "Api1": {
                "data": [{ "name": "first" }, { "name": "second" }],
                "isLoading": false,
            },
            "Input1": { "text": "hello" },
        })
    }

    #[test]
    fn resolves_nested_object_path() {
        assert_eq!(resolve_path(&tree(), "Input1.text"), Some(json!("hello")));
    }

    #[test]
    fn resolves_array_index() {
        assert_eq!(
            resolve_path(&tree(), "Api1.data[1].name"),
            Some(json!("second"))
        );
    }

    #[test]
    fn returns_whole_subtree_for_entity_name() {
        assert_eq!(
            resolve_path(&tree(), "Input1"),
            Some(json!({ "text": "hello" }))
        );
    }

    #[test]
    fn missing_segment_is_none() {
        assert_eq!(resolve_path(&tree(), "Api1.data[5].name"), None);
        assert_eq!(resolve_path(&tree(), "Api2.data"), None);
        assert_eq!(resolve_path(&tree(), "Input1.text.deeper"), None);
    }

    #[test]
    fn empty_path_is_none() {
        assert_eq!(resolve_path(&tree(), ""), None);
    }
}
