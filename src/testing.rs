//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::{CatalogEntry, Tier};

/// Create a catalog entry with the fields the engine reads.
///
/// This is the canonical implementation used across all tests.
pub fn make_entry(
    id: &str,
    tier: Tier,
    rating: f64,
    categories: &[&str],
    keywords: &[&str],
) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        tier,
        name: format!("Tool {}", id),
        tagline: format!("Tagline for {}", id),
        description: String::new(),
        url: format!("https://example.com/{}", id),
        rating,
        categories: categories.iter().map(|s| s.to_string()).collect(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        features: vec![],
        cta_url: None,
        cta_label: None,
        badge: None,
        mini_preview: None,
        scout_says: None,
    }
}

/// Create an entry with no categories or keywords.
pub fn make_entry_simple(id: &str, tier: Tier, rating: f64) -> CatalogEntry {
    make_entry(id, tier, rating, &[], &[])
}
