//! Slug-to-title normalization for folder and repository names.
//!
//! Folder names like `1-get-started` and repository names like
//! `You-Dont-Know-JS` become display titles: dashes and underscores turn
//! into spaces, each word is capitalized, and a small fixed table restores
//! the casing of acronyms that plain capitalization would mangle.
//!
//! - `"1-get-started"` → "1 Get Started"
//! - `"es6-iteration_protocols"` → "ES6 Iteration Protocols"
//! - `"You-Dont-Know-JS"` → "You Dont Know JS"

/// Acronyms that keep their own casing instead of `Capitalize` treatment.
/// Lookup keys are the already-lowercased words produced by normalization.
const ACRONYMS: &[(&str, &str)] = &[("js", "JS"), ("es", "ES"), ("es6", "ES6")];

/// Turn a raw slug into a display title.
///
/// Dashes and underscores become spaces, the whole string is lowercased and
/// trimmed, then each word is either looked up in the acronym table or
/// capitalized. Empty input yields an empty string.
pub fn titleize(raw: &str) -> String {
    let normalized = raw.replace(['-', '_'], " ").to_lowercase();

    normalized
        .split_whitespace()
        .map(|word| match ACRONYMS.iter().find(|(key, _)| *key == word) {
            Some((_, acronym)) => (*acronym).to_string(),
            None => capitalize(word),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character. The rest is already lowercase after
/// normalization.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
