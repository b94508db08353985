//! Empty and whitespace-only queries.

use crate::common::{make_entry_simple, travel_catalog};
use scout::{
    recommend, Assembler, EmptyQueryPolicy, EngineConfig, FallbackPolicy, RecommendError, Tier,
};

fn rejecting() -> Assembler {
    Assembler::new(EngineConfig {
        empty_query: EmptyQueryPolicy::Reject,
        ..EngineConfig::default()
    })
}

#[test]
fn test_empty_query_picks_best_rated_per_tier() {
    let catalog = travel_catalog();
    let selection = recommend("", catalog.entries()).unwrap();

    assert_eq!(selection.get("sponsoredTool").unwrap().id, "routegenix");
    assert_eq!(selection.get("freeTool").unwrap().id, "wonderplan");
    assert_eq!(selection.get("trialTool").unwrap().id, "tripplanner");
    assert!(selection.picks.iter().all(|p| p.score == Some(0.0)));
}

#[test]
fn test_empty_query_equal_ratings_keep_catalog_order() {
    let catalog = vec![
        make_entry_simple("sponsor", Tier::Sponsored, 4.0),
        make_entry_simple("free-first", Tier::Free, 4.5),
        make_entry_simple("free-second", Tier::Free, 4.5),
        make_entry_simple("free-lower", Tier::Free, 4.4),
        make_entry_simple("trial", Tier::Trial, 3.0),
    ];

    let selection = recommend("   ", &catalog).unwrap();
    assert_eq!(selection.get("sponsoredTool").unwrap().id, "sponsor");
    assert_eq!(selection.get("freeTool").unwrap().id, "free-first");
    assert_eq!(selection.get("trialTool").unwrap().id, "trial");
    assert!(selection.picks.iter().all(|p| !p.fallback));
}

#[test]
fn test_empty_query_strict_ties_within_partition() {
    let catalog = vec![
        make_entry_simple("free-lower", Tier::Free, 4.4),
        make_entry_simple("free-first", Tier::Free, 4.5),
        make_entry_simple("free-second", Tier::Free, 4.5),
    ];
    let assembler = Assembler::new(EngineConfig {
        fallback: FallbackPolicy::Strict,
        ..EngineConfig::default()
    });

    let selection = assembler.assemble("", &catalog).unwrap();
    assert!(selection.get("sponsoredTool").is_none());
    assert_eq!(selection.get("freeTool").unwrap().id, "free-first");
    assert!(selection.get("trialTool").is_none());
}

#[test]
fn test_reject_policy_errors_on_blank_input() {
    let catalog = travel_catalog();
    for query in ["", "   ", "\t\n"] {
        assert_eq!(
            rejecting().assemble(query, catalog.entries()).unwrap_err(),
            RecommendError::MissingQuery,
            "query {:?} should be rejected",
            query
        );
    }
}

#[test]
fn test_reject_policy_accepts_punctuation_only_query() {
    // Normalizes to nothing but is not blank input, so it is served.
    let catalog = travel_catalog();
    let selection = rejecting().assemble("???", catalog.entries()).unwrap();
    assert!(selection.picks.iter().all(|p| p.score == Some(0.0)));
    assert_eq!(selection.get("sponsoredTool").unwrap().id, "routegenix");
}
