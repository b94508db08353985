//! Runtime contracts for the ranking invariants.
//!
//! Debug-mode assertions that check the properties the rest of the crate
//! relies on. They:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fail **early** during development and in the test suite
//!
//! | Contract Function            | Property                                    |
//! |------------------------------|---------------------------------------------|
//! | `check_score_valid`          | score is finite and non-negative            |
//! | `check_selection_distinct`   | no id appears twice in one selection        |
//! | `check_fallback_consistent`  | non-fallback picks come from their partition|

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// Match dominance for the default weights: the smallest match weight beats
/// the largest possible rating tie-break.
const _: () = {
    use crate::scoring::{CATEGORY_WEIGHT, KEYWORD_PHRASE_WEIGHT, KEYWORD_TOKEN_WEIGHT, MAX_TIEBREAK};

    assert!(KEYWORD_PHRASE_WEIGHT > MAX_TIEBREAK); // 2.0 > 0.5
    assert!(CATEGORY_WEIGHT > MAX_TIEBREAK); // 3.0 > 0.5
    assert!(KEYWORD_TOKEN_WEIGHT > MAX_TIEBREAK); // 4.0 > 0.5
};

use std::collections::HashSet;

use crate::assemble::{Selection, SlotLayout};

// ============================================================================
// SCORE CONTRACTS
// ============================================================================

/// Check that a score is usable for ranking.
///
/// # Panics (debug builds only)
/// Panics if `score` is NaN, infinite or negative.
#[inline]
pub fn check_score_valid(score: f64) {
    debug_assert!(
        score.is_finite() && score >= 0.0,
        "Contract violation: score {} is not a finite non-negative number",
        score
    );
}

// ============================================================================
// SELECTION CONTRACTS
// ============================================================================

/// Check that no entry id appears in more than one slot.
///
/// # Panics (debug builds only)
/// Panics on the first repeated id.
#[inline]
pub fn check_selection_distinct(selection: &Selection<'_>) {
    if cfg!(debug_assertions) {
        let mut seen = HashSet::new();
        for pick in &selection.picks {
            if let Some(entry) = pick.entry {
                debug_assert!(
                    seen.insert(entry.id.as_str()),
                    "Contract violation: id '{}' selected twice (second time for slot '{}')",
                    entry.id,
                    pick.slot
                );
            }
            if let Some(score) = pick.score {
                check_score_valid(score);
            }
        }
    }
}

/// Check that every pick not flagged as fallback belongs to its slot's tiers.
///
/// # Panics (debug builds only)
/// Panics if a pick's tier is outside its slot partition without the
/// fallback flag, or if the selection and layout disagree on slot names.
#[inline]
pub fn check_fallback_consistent(selection: &Selection<'_>, layout: &SlotLayout) {
    if cfg!(debug_assertions) {
        debug_assert_eq!(selection.picks.len(), layout.slots().len());
        for (pick, spec) in selection.picks.iter().zip(layout.slots()) {
            debug_assert_eq!(pick.slot, spec.name);
            if let (Some(entry), false) = (pick.entry, pick.fallback) {
                debug_assert!(
                    spec.tiers.contains(&entry.tier),
                    "Contract violation: '{}' ({}) in slot '{}' without fallback",
                    entry.id,
                    entry.tier,
                    spec.name
                );
            }
        }
    }
}
