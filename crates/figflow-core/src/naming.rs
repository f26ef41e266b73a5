//! Title <-> filename stem mapping and collision handling

use std::path::Path;

/// Turn a human title into a filesystem-safe stem.
///
/// Strips surrounding spaces, replaces inner spaces with hyphens, lowercases.
pub fn simplify(title: &str) -> String {
    title.trim_matches(' ').replace(' ', "-").to_lowercase()
}

/// Turn a figure filename back into a display title.
///
/// Hyphens become spaces, words are title-cased, and the last four
/// characters are dropped. The input is expected to carry a four-character
/// extension such as `.svg`; a bare stem loses its tail.
pub fn beautify(filename: &str) -> String {
    let titled = title_case(&filename.replace('-', " "));
    let keep = titled.chars().count().saturating_sub(4);
    titled.chars().take(keep).collect()
}

/// Derive a new stem for an already-taken one.
///
/// A trailing digit is incremented (`fig-2` -> `fig-3`), anything else gets
/// `-1` appended. Only the last character is considered, so `fig-19`
/// becomes `fig-110`.
pub fn resolve_collision(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next_back().and_then(|c| c.to_digit(10)) {
        Some(digit) => format!("{}{}", chars.as_str(), digit + 1),
        None => format!("{}-1", stem),
    }
}

/// Apply [`resolve_collision`] until `<dir>/<stem>.svg` does not exist.
pub fn next_free_stem(dir: &Path, stem: &str) -> String {
    let mut candidate = stem.to_string();
    while dir.join(format!("{}.svg", candidate)).exists() {
        candidate = resolve_collision(&candidate);
    }
    candidate
}

// Upper-case a letter when the preceding char is not a letter.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if prev_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_letter = c.is_alphabetic();
    }
    out
}
