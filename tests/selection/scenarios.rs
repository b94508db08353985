//! End-to-end recommendation scenarios.

use crate::common::{assert_distinct, make_entry, make_entry_simple, travel_catalog};
use scout::{recommend, select_best, Catalog, Tier};
use std::collections::HashSet;

#[test]
fn test_keyword_match_beats_higher_rating() {
    let catalog = vec![
        make_entry_simple("topper", Tier::Sponsored, 5.0),
        make_entry(
            "routegenix",
            Tier::Sponsored,
            4.9,
            &[],
            &["routing", "route", "multi-stop", "optimizer"],
        ),
    ];

    let selection = recommend("best multi-stop route optimizer", &catalog).unwrap();
    assert_eq!(
        selection.get("sponsoredTool").map(|e| e.id.as_str()),
        Some("routegenix"),
        "A matching entry should win its slot over a better-rated non-match"
    );
}

#[test]
fn test_builtin_catalog_route_query() {
    let catalog = Catalog::builtin().unwrap();
    let selection = recommend("best multi-stop route optimizer", catalog.entries()).unwrap();

    assert_eq!(selection.get("sponsoredTool").unwrap().id, "routegenix-ai");
    assert_eq!(selection.get("freeTool").unwrap().id, "wonderplan");
    assert_eq!(selection.get("trialTool").unwrap().id, "tripplanner-ai");
    assert!(selection.picks.iter().all(|p| !p.fallback));
}

#[test]
fn test_two_entries_three_slots_leaves_third_null() {
    let catalog = vec![
        make_entry("a", Tier::Sponsored, 4.5, &[], &["route"]),
        make_entry("b", Tier::Sponsored, 4.0, &[], &["route"]),
    ];

    let selection = recommend("route", &catalog).unwrap();
    assert_eq!(selection.picks.len(), 3);
    assert_eq!(selection.entries().count(), 2);
    assert!(
        selection.get("trialTool").is_none(),
        "Nothing is left for the last slot"
    );
    assert_distinct(&selection);
}

#[test]
fn test_travel_query_fills_each_tier() {
    let catalog = travel_catalog();
    let selection = recommend("plan a trip itinerary", catalog.entries()).unwrap();

    let sponsored = selection.get("sponsoredTool").unwrap();
    let free = selection.get("freeTool").unwrap();
    let trial = selection.get("trialTool").unwrap();
    assert_eq!(sponsored.tier, Tier::Sponsored);
    assert_eq!(free.id, "wonderplan");
    assert_eq!(trial.id, "tripplanner");
    assert_distinct(&selection);
}

#[test]
fn test_select_best_respects_exclusion() {
    let catalog = travel_catalog();
    let sponsored: Vec<_> = catalog.partition(&[Tier::Sponsored]).cloned().collect();

    let first = select_best("delivery route", &sponsored, &HashSet::new()).unwrap();
    assert_eq!(first.id, "routegenix");

    let exclude: HashSet<String> = [first.id.clone()].into_iter().collect();
    let second = select_best("delivery route", &sponsored, &exclude).unwrap();
    assert_eq!(second.id, "fleetboost");

    let exclude: HashSet<String> = sponsored.iter().map(|e| e.id.clone()).collect();
    assert!(select_best("delivery route", &sponsored, &exclude).is_none());
}

#[test]
fn test_select_best_empty_pool() {
    assert!(select_best("anything", &[], &HashSet::new()).is_none());
}

#[test]
fn test_wire_json_shape() {
    let catalog = Catalog::builtin().unwrap();
    let selection = recommend("trip planner", catalog.entries()).unwrap();
    let json = serde_json::to_value(&selection).unwrap();

    let object = json.as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 3);
    for slot in ["sponsoredTool", "freeTool", "trialTool"] {
        assert!(object.contains_key(slot), "missing slot {}", slot);
    }
    assert_eq!(json["trialTool"]["id"], "tripplanner-ai");
    assert!(json["sponsoredTool"]["miniPreview"].is_string());
}
