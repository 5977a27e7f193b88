/*!
 * Whitespace normalization applied before token protection and cache-key
 * computation, so segments that differ only in incidental whitespace share
 * one cache entry and one provider call.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static HORIZONTAL_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Collapse runs of spaces and tabs to a single space, unify CRLF line
/// endings to LF, and trim leading/trailing whitespace.
pub fn normalize_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    HORIZONTAL_WHITESPACE
        .replace_all(&unified, " ")
        .trim()
        .to_string()
}
