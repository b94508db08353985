//! Shared test utilities and fixtures.

#![allow(dead_code)]

use scout::{Catalog, CatalogEntry, Selection, Tier};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

// Re-export canonical test utilities from scout::testing
pub use scout::testing::{make_entry, make_entry_simple};

// ============================================================================
// FIXTURES
// ============================================================================

/// Path to the travel catalog fixture.
pub const TRAVEL_CATALOG: &str = "tests/fixtures/travel_catalog.json";

/// A mid-sized catalog covering every tier, in a fixed order.
pub fn travel_entries() -> Vec<CatalogEntry> {
    vec![
        make_entry("routegenix", Tier::Sponsored, 4.9, &["routing", "logistics"], &["routing", "route", "multi-stop", "optimizer", "delivery"]),
        make_entry("fleetboost", Tier::Sponsored, 4.6, &["logistics"], &["fleet", "dispatch", "delivery"]),
        make_entry("wonderplan", Tier::Free, 4.7, &["travel", "planning"], &["trip", "travel", "itinerary", "vacation"]),
        make_entry("mapnotes", Tier::Free, 4.2, &["maps"], &["map", "notes", "route"]),
        make_entry("tripplanner", Tier::Trial, 4.9, &["travel", "routing"], &["trip", "planner", "route", "optimize"]),
        make_entry("budgetpal", Tier::Freemium, 4.4, &["finance"], &["budget", "expenses", "travel"]),
    ]
}

pub fn travel_catalog() -> Catalog {
    Catalog::from_entries(travel_entries()).expect("travel catalog is valid")
}

/// Write `json` to a fresh temp file and return the dir guard and path.
pub fn write_temp_catalog(json: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.json");
    fs::write(&path, json).expect("Failed to write catalog");
    (dir, path)
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Slot name to picked id, `None` for an empty slot.
pub fn picked_ids(selection: &Selection<'_>) -> Vec<(String, Option<String>)> {
    selection
        .picks
        .iter()
        .map(|p| (p.slot.clone(), p.entry.map(|e| e.id.clone())))
        .collect()
}

/// Panic if any id appears in two slots.
pub fn assert_distinct(selection: &Selection<'_>) {
    let mut seen = HashSet::new();
    for entry in selection.entries() {
        assert!(
            seen.insert(entry.id.as_str()),
            "id '{}' appears in more than one slot: {:?}",
            entry.id,
            picked_ids(selection)
        );
    }
}
