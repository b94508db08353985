// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core catalog types.
//!
//! `CatalogEntry` is what the collaborator authors and what the engine hands
//! back. The engine reads `tier`, `rating`, `categories` and `keywords`; the
//! display fields ride along untouched so the UI can render a card without a
//! second lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of tool tiers. Partitions the catalog into output slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Sponsored,
    Trial,
    Free,
    Freemium,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Sponsored, Tier::Trial, Tier::Free, Tier::Freemium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Sponsored => "sponsored",
            Tier::Trial => "trial",
            Tier::Free => "free",
            Tier::Freemium => "freemium",
        }
    }

    /// Badge text shown when an entry doesn't carry its own.
    pub fn default_badge(&self) -> &'static str {
        match self {
            Tier::Sponsored => "SPONSORED",
            Tier::Trial => "TRIAL",
            Tier::Free => "FREE",
            Tier::Freemium => "FREEMIUM",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tier '{}'", s))
    }
}

/// One recommendable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub tier: Tier,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    /// 0.0-5.0. Tie-breaker only.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Free-form feature phrases. Only the haystack profile scores these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scout_says: Option<String>,
}

impl CatalogEntry {
    /// Where the call-to-action should point: the override if present.
    pub fn cta_target(&self) -> &str {
        self.cta_url.as_deref().unwrap_or(&self.url)
    }

    pub fn badge_text(&self) -> &str {
        self.badge.as_deref().unwrap_or_else(|| self.tier.default_badge())
    }
}
