use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static NON_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]").unwrap());
static UNDERSCORE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Reduce a raw heading to an identifier: trim, then drop every character
/// outside [0-9A-Za-z_]. Anchor markers go with the rest. Idempotent; the
/// result may be empty, which the walker treats as "not a function".
pub fn sanitize_name(raw: &str) -> String {
    NON_IDENT_RE.replace_all(raw.trim(), "").into_owned()
}

/// Lowercased, trimmed type label; "any" when absent or blank.
pub fn normalize_type(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => "any".to_string(),
    }
}

/// Heading title with underscore runs replaced by spaces, used as the
/// description line when the page gives no paragraph.
pub fn pretty_title(title: &str) -> String {
    UNDERSCORE_RUN_RE.replace_all(title, " ").into_owned()
}

/// All text under an element, whitespace-collapsed. Text nodes are joined
/// with a space so adjacent inline elements stay separate tokens.
pub fn flatten_text(el: &ElementRef) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Collapse whitespace runs into single spaces and trim the ends.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
