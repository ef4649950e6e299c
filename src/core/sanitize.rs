// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::consts::NOT_APPLICABLE;

/// Compatibility decomposition (NFKD). Ligatures, fullwidth brackets and
/// digits, and non-breaking spaces all fold to their plain forms.
pub fn nfkd(s: &str) -> String {
    s.nfkd().collect()
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Leftover `.mw-parser-output … }` stylesheet text that table scraping
/// drags into cell values.
pub fn strip_parser_artifacts(s: &str) -> String {
    static ARTIFACT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\.mw-parser.+\}").expect("valid regex"));
    ARTIFACT_RE.replace_all(s, "").into_owned()
}

/// `None` for the "not applicable" marker, otherwise the cell.
pub fn applicable(cell: &str) -> Option<&str> {
    if cell.trim() == NOT_APPLICABLE { None } else { Some(cell) }
}
