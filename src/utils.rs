//! Query and label normalization.
//!
//! Everything the scorer compares goes through [`normalize`] first, queries and
//! catalog labels alike. Matching is then plain string equality on tokens or
//! substring containment on the normalized text, so normalization is the only
//! place where "same word" gets decided.

use std::collections::HashSet;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching: lowercase, strip everything outside `[a-z0-9]`,
/// collapse whitespace.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize and drop combining marks ("café" → "cafe")
/// 2. Lowercase
/// 3. Replace every character outside `[a-z0-9\s]` with a space
/// 4. Collapse whitespace runs to one space and trim
///
/// Without the feature step 1 is skipped, so accented letters become spaces.
///
/// ```
/// assert_eq!(scout::normalize("  Multi-Stop   Route!! "), "multi stop route");
/// assert_eq!(scout::normalize("???"), "");
/// ```
pub fn normalize(value: &str) -> String {
    let folded = fold_marks(value).to_lowercase();
    let replaced: String = folded
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(feature = "unicode-normalization")]
fn fold_marks(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(not(feature = "unicode-normalization"))]
fn fold_marks(value: &str) -> String {
    value.to_string()
}

/// Combining marks (Unicode category Mn) in the blocks Latin text uses.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Split normalized text into tokens.
///
/// The iterator borrows from `normalized` and is consumed once; call again for
/// a fresh pass. Empty input yields nothing.
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> + '_ {
    normalized.split_whitespace().filter(|t| !t.is_empty())
}

/// Token membership set. Duplicate tokens collapse.
pub fn token_set(normalized: &str) -> HashSet<&str> {
    tokenize(normalized).collect()
}
