use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    static ref STRIP: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
}

/// Normalize text into unique tokens sorted ascending.
///
/// The text is lowercased, every character that is not an ASCII letter, ASCII
/// digit or whitespace is removed, and the remainder is split on whitespace.
/// Accented letters are dropped rather than folded, so `café` becomes `caf`. Empty
/// tokens are never produced, so blank or punctuation-only input yields an
/// empty list.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = STRIP.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
