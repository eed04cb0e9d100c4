use std::collections::HashSet;
use std::sync::LazyLock;

use serde_json::Value;

/// Reserved words of the binding expression language.
static EXPRESSION_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "arguments",
        "await",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "eval",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "let",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "static",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "undefined",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ]
    .into_iter()
    .collect()
});

/// Names the evaluator itself plants at the top of the data tree.
static DATA_TREE_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["actionPaths", "url", "pageList", "store", "appVersion"]
        .into_iter()
        .collect()
});

/// Platform functions exposed to binding expressions.
static PLATFORM_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "fetch",
        "navigateTo",
        "showAlert",
        "showModal",
        "closeModal",
        "storeValue",
        "runAction",
        "copyToClipboard",
        "download",
        "resetWidget",
        "setInterval",
        "clearInterval",
    ]
    .into_iter()
    .collect()
});

/// Whether a name is usable for a new entity. A name is rejected when it
/// collides with an expression keyword, a data-tree keyword, a platform
/// function, or any key in the caller's in-use map.
pub fn is_name_valid(name: &str, in_use: &serde_json::Map<String, Value>) -> bool {
    !(EXPRESSION_KEYWORDS.contains(name)
        || DATA_TREE_KEYWORDS.contains(name)
        || PLATFORM_FUNCTIONS.contains(name)
        || in_use.contains_key(name))
}
