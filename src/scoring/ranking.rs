// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate ranking: how scored entries get ordered.
//!
//! Sort order:
//! 1. **Score** - higher wins
//! 2. **Rating** - higher wins, only under [`TieBreak::Rating`]
//! 3. **Position** - earlier catalog position wins
//!
//! A non-empty query ranks with [`TieBreak::CatalogOrder`]: its score already
//! carries the rating term, and an exact tie goes to the first entry. Only the
//! empty query, where every score is 0, ranks by rating before position.
//! Step 3 makes the order total and therefore deterministic.

use crate::types::CatalogEntry;
use serde::Serialize;
use std::cmp::Ordering;

/// An entry with its score and catalog position.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Candidate<'a> {
    pub entry: &'a CatalogEntry,
    pub score: f64,
    /// Index in the pool the candidate was drawn from.
    pub position: usize,
}

/// How candidates with exactly equal scores are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First in the pool wins.
    #[default]
    CatalogOrder,
    /// Higher rating wins, then first in the pool.
    Rating,
}

/// Compare two candidates. `Ordering::Less` means `a` ranks ahead of `b`.
pub fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>, tie_break: TieBreak) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| match tie_break {
            TieBreak::Rating => b.entry.rating.total_cmp(&a.entry.rating),
            TieBreak::CatalogOrder => Ordering::Equal,
        })
        .then_with(|| a.position.cmp(&b.position))
}

/// Best candidate by a first-best scan. Full ties keep the earlier candidate.
pub fn best_candidate<'a, I>(candidates: I, tie_break: TieBreak) -> Option<Candidate<'a>>
where
    I: IntoIterator<Item = Candidate<'a>>,
{
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(current) if compare_candidates(&candidate, &current, tie_break) != Ordering::Less => {
            Some(current)
        }
        _ => Some(candidate),
    })
}
