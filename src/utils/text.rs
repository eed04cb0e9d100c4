use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());
static NON_WORD_NON_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static TRAILING_SLASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/+$").unwrap());

const DEFAULT_NAME_LIMIT: usize = 30;

/// Human-readable base-1024 byte count. `None` in, `None` out.
pub fn format_bytes(bytes: Option<u64>) -> Option<String> {
    const SIZES: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    let value = bytes?;
    if value == 0 {
        return Some("0 bytes".to_string());
    }
    let i = (((value as f64).ln() / 1024_f64.ln()).floor() as usize).min(SIZES.len() - 1);
    if i == 0 {
        return Some(format!("{value} {}", SIZES[0]));
    }
    Some(format!(
        "{:.1} {}",
        value as f64 / 1024_f64.powi(i as i32),
        SIZES[i]
    ))
}

/// Parse a CSS pixel string like `"120px"`. Anything else is 0.
pub fn absolute_pixels(size: Option<&str>) -> i32 {
    let Some(size) = size else { return 0 };
    match size.find("px") {
        Some(idx) => size[..idx].trim().parse().unwrap_or(0),
        None => 0,
    }
}

/// Collapse runs of non-word characters into underscores, capped at `limit`
/// characters (30 by default).
pub fn remove_special_chars(value: &str, limit: Option<usize>) -> String {
    let joined = NON_WORD_RUN.split(value).collect::<Vec<_>>().join("_");
    joined
        .chars()
        .take(limit.unwrap_or(DEFAULT_NAME_LIMIT))
        .collect()
}

/// Strip punctuation and collapse whitespace runs into single spaces, capped
/// at `limit` characters (30 by default).
pub fn resolve_as_space_char(value: &str, limit: Option<usize>) -> String {
    let stripped = NON_WORD_NON_SPACE.replace_all(value, "");
    let collapsed = WHITESPACE_RUN
        .split(&stripped)
        .collect::<Vec<_>>()
        .join(" ");
    collapsed
        .chars()
        .take(limit.unwrap_or(DEFAULT_NAME_LIMIT))
        .collect()
}

/// Strip trailing slashes from a path.
pub fn trim_trailing_slash(path: &str) -> String {
    TRAILING_SLASHES.replace(path, "").to_string()
}

/// `["a", "b", "c"]` → `"a, b and c"`.
pub fn convert_array_to_sentence<S: AsRef<str>>(items: &[S]) -> String {
    let joined = items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    match joined.rfind(", ") {
        Some(idx) => format!("{} and {}", &joined[..idx], &joined[idx + 2..]),
        None => joined,
    }
}

pub fn is_mac() -> bool {
    cfg!(target_os = "macos")
}
