// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Slot assembly: one request in, one de-duplicated multi-slot result out.
//!
//! Slots are filled strictly in layout order. Each slot draws from its own tier
//! partition and every winner is excluded from the slots after it, so a tool
//! appears at most once per result. When a slot's partition has nothing left,
//! the fallback policy decides between broadening to the whole catalog and
//! leaving the slot empty.
//!
//! **Invariant**: non-null entries in a [`Selection`] have pairwise distinct ids.
//!
//! **Verified by**:
//! - `prop_selection_ids_distinct` (tests/property.rs)
//! - `fuzz_targets/slot_selection.rs`
//!
//! # Layouts
//!
//! | Layout      | Slots (priority order)                                   |
//! |-------------|----------------------------------------------------------|
//! | `three-slot`| `sponsoredTool` [sponsored], `freeTool` [free], `trialTool` [trial] |
//! | `tiered`    | `sponsoredOrTrial` [sponsored, trial], `freeOrFreemium` [free, freemium] + summary |

use std::collections::HashSet;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::EngineConfig;
use crate::contracts::{check_fallback_consistent, check_selection_distinct};
use crate::error::RecommendError;
use crate::scoring::{PreparedQuery, QueryScorer};
use crate::select::select_best_with;
use crate::types::{CatalogEntry, Tier};

/// What to do with a query that is empty after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyQueryPolicy {
    /// Select anyway. Every score is 0, so slots go to the best-rated entry
    /// of each partition, catalog order breaking ties.
    #[default]
    RatingOrder,
    /// Fail with [`RecommendError::MissingQuery`].
    Reject,
}

/// What to do when a slot's partition has no entry left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Take the best remaining entry of any tier.
    #[default]
    AnyTier,
    /// Leave the slot empty.
    Strict,
}

/// Built-in slot layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    #[default]
    ThreeSlot,
    Tiered,
}

/// One named output position and the tiers it draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: String,
    pub tiers: Vec<Tier>,
}

impl SlotSpec {
    pub fn new(name: impl Into<String>, tiers: &[Tier]) -> Self {
        Self {
            name: name.into(),
            tiers: tiers.to_vec(),
        }
    }
}

/// Ordered slots plus whether the result carries a summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    slots: Vec<SlotSpec>,
    summary: bool,
}

impl SlotLayout {
    pub fn new(slots: Vec<SlotSpec>) -> Self {
        Self {
            slots,
            summary: false,
        }
    }

    pub fn with_summary(mut self) -> Self {
        self.summary = true;
        self
    }

    /// `sponsoredTool`, `freeTool`, `trialTool`.
    pub fn three_slot() -> Self {
        Self::new(vec![
            SlotSpec::new("sponsoredTool", &[Tier::Sponsored]),
            SlotSpec::new("freeTool", &[Tier::Free]),
            SlotSpec::new("trialTool", &[Tier::Trial]),
        ])
    }

    /// `sponsoredOrTrial`, `freeOrFreemium` and a summary.
    pub fn tiered() -> Self {
        Self::new(vec![
            SlotSpec::new("sponsoredOrTrial", &[Tier::Sponsored, Tier::Trial]),
            SlotSpec::new("freeOrFreemium", &[Tier::Free, Tier::Freemium]),
        ])
        .with_summary()
    }

    pub fn slots(&self) -> &[SlotSpec] {
        &self.slots
    }
}

impl From<LayoutKind> for SlotLayout {
    fn from(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::ThreeSlot => SlotLayout::three_slot(),
            LayoutKind::Tiered => SlotLayout::tiered(),
        }
    }
}

/// Outcome for one slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotPick<'a> {
    pub slot: String,
    pub entry: Option<&'a CatalogEntry>,
    /// Winning score, `None` for an empty slot.
    pub score: Option<f64>,
    /// The entry came from outside the slot's own partition.
    pub fallback: bool,
}

/// Result of one request.
///
/// Serializes as the wire shape: an object mapping each slot name to an entry
/// or `null`, in slot order, plus `summary` when the layout asks for one.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub picks: Vec<SlotPick<'a>>,
    pub summary: Option<String>,
}

impl<'a> Selection<'a> {
    pub fn get(&self, slot: &str) -> Option<&'a CatalogEntry> {
        self.picks
            .iter()
            .find(|p| p.slot == slot)
            .and_then(|p| p.entry)
    }

    /// Non-null entries in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &'a CatalogEntry> + '_ {
        self.picks.iter().filter_map(|p| p.entry)
    }

    pub fn is_empty(&self) -> bool {
        self.picks.iter().all(|p| p.entry.is_none())
    }
}

impl Serialize for Selection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.picks.len() + usize::from(self.summary.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for pick in &self.picks {
            map.serialize_entry(&pick.slot, &pick.entry)?;
        }
        if let Some(summary) = &self.summary {
            map.serialize_entry("summary", summary)?;
        }
        map.end()
    }
}

/// Runs the slot protocol with a fixed config and layout.
#[derive(Debug, Clone)]
pub struct Assembler {
    config: EngineConfig,
    layout: SlotLayout,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Assembler {
    /// Assembler using the layout named in `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            layout: config.layout.into(),
            config,
        }
    }

    pub fn with_layout(config: EngineConfig, layout: SlotLayout) -> Self {
        Self { config, layout }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Fill every slot for `query` from `catalog`.
    ///
    /// Only [`EmptyQueryPolicy::Reject`] can fail. Empty partitions are not
    /// errors; they produce null slots or fallback picks.
    pub fn assemble<'a>(
        &self,
        query: &str,
        catalog: &'a [CatalogEntry],
    ) -> Result<Selection<'a>, RecommendError> {
        let query = query.trim();
        if query.is_empty() && self.config.empty_query == EmptyQueryPolicy::Reject {
            tracing::debug!("empty query rejected");
            return Err(RecommendError::MissingQuery);
        }

        let prepared = PreparedQuery::new(query);
        let scorer = QueryScorer::new(&prepared, self.config.weights, self.config.profile);
        let mut exclude: HashSet<String> = HashSet::with_capacity(self.layout.slots.len());
        let mut picks = Vec::with_capacity(self.layout.slots.len());

        for spec in &self.layout.slots {
            let partition = catalog.iter().filter(|e| spec.tiers.contains(&e.tier));
            let mut fallback = false;
            let mut winner = select_best_with(&scorer, partition, &exclude);

            if winner.is_none() && self.config.fallback == FallbackPolicy::AnyTier {
                winner = select_best_with(&scorer, catalog, &exclude);
                fallback = winner.is_some();
                if let Some(candidate) = &winner {
                    tracing::debug!(
                        slot = %spec.name,
                        id = %candidate.entry.id,
                        tier = %candidate.entry.tier,
                        "partition exhausted, filled from any tier"
                    );
                }
            }

            if let Some(candidate) = &winner {
                exclude.insert(candidate.entry.id.clone());
            }
            picks.push(SlotPick {
                slot: spec.name.clone(),
                entry: winner.map(|c| c.entry),
                score: winner.map(|c| c.score),
                fallback,
            });
        }

        let summary = self.layout.summary.then(|| summarize(query, &picks));
        let selection = Selection { picks, summary };
        check_selection_distinct(&selection);
        check_fallback_consistent(&selection, &self.layout);
        Ok(selection)
    }
}

/// Assemble with the default config: three slots, rating-order for empty
/// queries, any-tier fallback.
pub fn recommend<'a>(
    query: &str,
    catalog: &'a [CatalogEntry],
) -> Result<Selection<'a>, RecommendError> {
    Assembler::default().assemble(query, catalog)
}

/// One-line, deterministic description of the picks.
fn summarize(query: &str, picks: &[SlotPick<'_>]) -> String {
    let described: Vec<String> = picks
        .iter()
        .filter_map(|p| p.entry)
        .map(|e| {
            let mut line = format!("{} ({}, {:.1} stars)", e.name, e.badge_text(), e.rating);
            if !e.tagline.is_empty() {
                line.push_str(": ");
                line.push_str(e.tagline.trim_end_matches('.'));
            }
            line
        })
        .collect();

    match (query.is_empty(), described.is_empty()) {
        (_, true) => "No tools available.".to_string(),
        (true, false) => format!("Top-rated picks: {}.", described.join("; ")),
        (false, false) => format!("Best matches for \"{}\": {}.", query, described.join("; ")),
    }
}
