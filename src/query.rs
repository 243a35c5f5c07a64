//! Search-term handling: decide whether the input can hit the API verbatim
//! or needs to be normalized into an API name first.

/// Keeps the gender marks some species carry in their display names.
fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '♀' | '♂')
}

/// Numeric id, usable as-is.
pub fn is_numeric_id(term: &str) -> bool {
    !term.is_empty() && term.chars().all(|ch| ch.is_ascii_digit())
}

/// Plain API name (ascii alphanumerics and hyphens), usable as-is.
pub fn is_plain_name(term: &str) -> bool {
    !term.is_empty()
        && term
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

/// Lower-cases, collapses internal whitespace runs to single hyphens and
/// strips everything outside the API name alphabet.
pub fn normalize_name(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut pending_gap = false;
    for ch in term.trim().to_lowercase().chars() {
        if ch.is_whitespace() {
            pending_gap = !out.is_empty();
            continue;
        }
        if !is_name_char(ch) {
            continue;
        }
        if pending_gap {
            out.push('-');
            pending_gap = false;
        }
        out.push(ch);
    }
    out
}

/// Resolves a trimmed, non-empty search term to the API lookup key.
pub fn lookup_key(term: &str) -> String {
    if is_numeric_id(term) || is_plain_name(term) {
        term.to_string()
    } else {
        normalize_name(term)
    }
}
