// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-pool selection.
//!
//! The selector answers one question: of the entries in this pool that haven't
//! been picked yet, which one ranks first? It never looks outside the pool it
//! is given. Broadening to other tiers is the assembler's call.

use std::collections::HashSet;

use crate::contracts::check_score_valid;
use crate::scoring::ranking::{best_candidate, compare_candidates, Candidate};
use crate::scoring::{PreparedQuery, QueryScorer};
use crate::types::CatalogEntry;

/// Best entry in `pool` not listed in `exclude_ids`, scored with the canonical
/// weights.
///
/// Returns `None` when every entry is excluded or the pool is empty. The
/// returned reference points into `pool`.
pub fn select_best<'a>(
    query: &str,
    pool: &'a [CatalogEntry],
    exclude_ids: &HashSet<String>,
) -> Option<&'a CatalogEntry> {
    let prepared = PreparedQuery::new(query);
    let scorer = QueryScorer::weighted(&prepared);
    select_best_with(&scorer, pool, exclude_ids).map(|c| c.entry)
}

/// [`select_best`] with an explicit scorer, returning the winning score too.
pub fn select_best_with<'a, I>(
    scorer: &QueryScorer<'_>,
    pool: I,
    exclude_ids: &HashSet<String>,
) -> Option<Candidate<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    best_candidate(candidates(scorer, pool, exclude_ids), scorer.tie_break())
}

/// Every non-excluded entry of `pool`, scored, best first.
///
/// Stable sort over catalog order, so equal candidates keep their catalog
/// order and `rank(..)[0]` agrees with [`select_best_with`].
pub fn rank<'a, I>(
    scorer: &QueryScorer<'_>,
    pool: I,
    exclude_ids: &HashSet<String>,
) -> Vec<Candidate<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut ranked = candidates(scorer, pool, exclude_ids);
    let tie_break = scorer.tie_break();
    ranked.sort_by(|a, b| compare_candidates(a, b, tie_break));
    ranked
}

fn candidates<'a, I>(
    scorer: &QueryScorer<'_>,
    pool: I,
    exclude_ids: &HashSet<String>,
) -> Vec<Candidate<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    pool.into_iter()
        .enumerate()
        .filter(|(_, entry)| !exclude_ids.contains(&entry.id))
        .map(|(position, entry)| {
            let score = scorer.score(entry);
            check_score_valid(score);
            Candidate {
                entry,
                score,
                position,
            }
        })
        .collect()
}
