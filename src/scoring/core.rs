// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind tool relevance.
//!
//! A score is a sum of fixed match weights plus a tiny rating term. The match
//! weights are whole numbers of at least 2 and the rating term tops out at 0.5,
//! so rating can order equally relevant tools but never lift a tool over one
//! with more matches.
//!
//! # Key Invariant: Match Dominance
//!
//! ```text
//! min(match weight) > MAX_TIEBREAK   (2.0 > 0.5)
//! ```
//!
//! Checked at compile time for the defaults (see `contracts`) and at load time
//! for configured weights (see [`ScoreWeights::validate`]).
//!
//! # Constants
//!
//! | Signal         | Weight | Fires when                                      |
//! |----------------|--------|-------------------------------------------------|
//! | Category       | 3.0    | normalized category is a query token or the query |
//! | Keyword token  | 4.0    | normalized keyword is a query token             |
//! | Keyword phrase | 2.0    | normalized keyword is a substring of the query  |
//! | Tie-break      | ≤ 0.5  | always: `round(rating * 10) / 100`              |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::scoring::ranking::TieBreak;
use crate::types::CatalogEntry;
use crate::utils::{normalize, token_set};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Weight for a category that appears as a query token.
pub const CATEGORY_WEIGHT: f64 = 3.0;

/// Weight for a keyword that appears as a query token.
pub const KEYWORD_TOKEN_WEIGHT: f64 = 4.0;

/// Weight for a keyword contained in the normalized query text.
pub const KEYWORD_PHRASE_WEIGHT: f64 = 2.0;

/// Highest rating the catalog accepts.
pub const MAX_RATING: f64 = 5.0;

/// Largest possible tie-break contribution (rating 5.0).
pub const MAX_TIEBREAK: f64 = 0.5;

// =============================================================================
// HAYSTACK PROFILE CONSTANTS
// =============================================================================
// The older scorer: substring hits against one blob of entry text, with a
// rating bias for tools above 4.5 stars.

/// Weight per query token found in the haystack.
pub const HAYSTACK_TOKEN_WEIGHT: f64 = 2.0;

/// Query tokens shorter than this are ignored by the haystack profile.
pub const HAYSTACK_MIN_TOKEN_LEN: usize = 3;

/// Ratings above this pivot earn a bias in the haystack profile.
pub const HAYSTACK_RATING_PIVOT: f64 = 4.5;

/// Cap on the haystack rating bias.
pub const HAYSTACK_MAX_RATING_BIAS: f64 = 1.5;

/// Match weights. Every non-zero weight must exceed [`MAX_TIEBREAK`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    pub category: f64,
    pub keyword_token: f64,
    pub keyword_phrase: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category: CATEGORY_WEIGHT,
            keyword_token: KEYWORD_TOKEN_WEIGHT,
            keyword_phrase: KEYWORD_PHRASE_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Check match dominance. Returns the offending `(name, value)` on failure.
    ///
    /// A weight of exactly zero switches that signal off and is allowed.
    pub fn validate(&self) -> Result<(), (&'static str, f64)> {
        for (name, value) in [
            ("category", self.category),
            ("keywordToken", self.keyword_token),
            ("keywordPhrase", self.keyword_phrase),
        ] {
            let ok = value.is_finite() && (value == 0.0 || value > MAX_TIEBREAK);
            if !ok {
                return Err((name, value));
            }
        }
        Ok(())
    }
}

/// Which scoring function to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringProfile {
    /// Category/keyword weights plus rating tie-break.
    #[default]
    Weighted,
    /// Token-in-text hits over name, tagline, keywords and features.
    Haystack,
}

/// A query normalized and tokenized once per request.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    normalized: String,
    lowered: String,
}

impl PreparedQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            normalized: normalize(raw),
            lowered: raw.trim().to_lowercase(),
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Trimmed and lowercased, punctuation kept. Only the haystack profile
    /// reads this form.
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn tokens(&self) -> HashSet<&str> {
        token_set(&self.normalized)
    }
}

/// Scorer bound to one prepared query.
///
/// Holds the token set so scoring a whole catalog tokenizes the query once.
pub struct QueryScorer<'q> {
    query: &'q PreparedQuery,
    tokens: HashSet<&'q str>,
    weights: ScoreWeights,
    profile: ScoringProfile,
}

impl<'q> QueryScorer<'q> {
    pub fn new(query: &'q PreparedQuery, weights: ScoreWeights, profile: ScoringProfile) -> Self {
        Self {
            query,
            tokens: query.tokens(),
            weights,
            profile,
        }
    }

    /// Canonical scorer with default weights.
    pub fn weighted(query: &'q PreparedQuery) -> Self {
        Self::new(query, ScoreWeights::default(), ScoringProfile::Weighted)
    }

    pub fn query(&self) -> &PreparedQuery {
        self.query
    }

    pub fn score(&self, entry: &CatalogEntry) -> f64 {
        match self.profile {
            ScoringProfile::Weighted => self.weighted_score(entry),
            ScoringProfile::Haystack => self.haystack_score(entry),
        }
    }

    /// How equal scores are ordered for this query.
    ///
    /// An empty query scores everything 0, so rating decides. Otherwise the
    /// earlier catalog entry wins.
    pub fn tie_break(&self) -> TieBreak {
        if self.query.is_empty() {
            TieBreak::Rating
        } else {
            TieBreak::CatalogOrder
        }
    }

    fn weighted_score(&self, entry: &CatalogEntry) -> f64 {
        if self.query.is_empty() {
            return 0.0;
        }
        let query_text = self.query.normalized();
        let mut score = 0.0;

        for category in &entry.categories {
            let label = normalize(category);
            if label.is_empty() {
                continue;
            }
            if self.tokens.contains(label.as_str()) || label == query_text {
                score += self.weights.category;
            }
        }

        for keyword in &entry.keywords {
            let label = normalize(keyword);
            if label.is_empty() {
                continue;
            }
            if self.tokens.contains(label.as_str()) {
                score += self.weights.keyword_token;
            }
            if query_text.contains(label.as_str()) {
                score += self.weights.keyword_phrase;
            }
        }

        score + rating_tiebreak(entry.rating)
    }

    fn haystack_score(&self, entry: &CatalogEntry) -> f64 {
        let query_text = self.query.lowered();
        if query_text.is_empty() {
            return 0.0;
        }
        let haystack = [entry.name.as_str(), entry.tagline.as_str()]
            .into_iter()
            .chain(entry.keywords.iter().map(String::as_str))
            .chain(entry.features.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        // Raw whitespace tokens, punctuation kept; every occurrence counts.
        let hits = query_text
            .split_whitespace()
            .filter(|t| t.chars().count() >= HAYSTACK_MIN_TOKEN_LEN && haystack.contains(*t))
            .count();

        hits as f64 * HAYSTACK_TOKEN_WEIGHT + haystack_rating_bias(entry.rating)
    }
}

/// Score one entry against a raw query with the canonical weights.
///
/// Prefer [`QueryScorer`] when scoring many entries for the same query.
pub fn score(query: &str, entry: &CatalogEntry) -> f64 {
    let prepared = PreparedQuery::new(query);
    QueryScorer::weighted(&prepared).score(entry)
}

/// Rating tie-break: `round(rating * 10) / 100`, in `[0, MAX_TIEBREAK]`.
///
/// Out-of-range or non-finite ratings never reach here from a validated
/// catalog; they are clamped anyway so the score stays non-negative.
pub fn rating_tiebreak(rating: f64) -> f64 {
    if !rating.is_finite() {
        return 0.0;
    }
    (rating.clamp(0.0, MAX_RATING) * 10.0).round() / 100.0
}

fn haystack_rating_bias(rating: f64) -> f64 {
    if !rating.is_finite() {
        return 0.0;
    }
    (rating - HAYSTACK_RATING_PIVOT).clamp(0.0, HAYSTACK_MAX_RATING_BIAS)
}
