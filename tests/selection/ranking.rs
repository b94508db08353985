//! Candidate ordering within a partition.

use crate::common::{make_entry, make_entry_simple, travel_catalog};
use scout::{
    rank, recommend, score, select_best_with, Assembler, EngineConfig, FallbackPolicy,
    PreparedQuery, QueryScorer, ScoringProfile, Tier,
};
use std::collections::HashSet;

#[test]
fn test_rank_orders_by_score() {
    let catalog = travel_catalog();
    let prepared = PreparedQuery::new("route optimizer");
    let scorer = QueryScorer::weighted(&prepared);
    let ranked = rank(&scorer, catalog.entries(), &HashSet::new());

    assert_eq!(ranked.len(), catalog.len());
    assert_eq!(ranked[0].entry.id, "routegenix");
    for pair in ranked.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "{} ({}) ranked above {} ({})",
            pair[0].entry.id,
            pair[0].score,
            pair[1].entry.id,
            pair[1].score
        );
    }
}

#[test]
fn test_rank_head_agrees_with_select_best() {
    let catalog = travel_catalog();
    for query in ["", "trip", "route", "budget travel", "nothing matches this"] {
        let prepared = PreparedQuery::new(query);
        let scorer = QueryScorer::weighted(&prepared);
        let ranked = rank(&scorer, catalog.entries(), &HashSet::new());
        let best = select_best_with(&scorer, catalog.entries(), &HashSet::new()).unwrap();
        assert_eq!(ranked[0].entry.id, best.entry.id, "query {:?}", query);
    }
}

#[test]
fn test_rank_skips_excluded() {
    let catalog = travel_catalog();
    let prepared = PreparedQuery::new("trip");
    let scorer = QueryScorer::weighted(&prepared);
    let exclude: HashSet<String> = ["wonderplan".to_string()].into_iter().collect();

    let ranked = rank(&scorer, catalog.entries(), &exclude);
    assert_eq!(ranked.len(), catalog.len() - 1);
    assert!(ranked.iter().all(|c| c.entry.id != "wonderplan"));
}

#[test]
fn test_equal_scores_first_listed_wins() {
    let catalog = vec![
        make_entry("first", Tier::Trial, 4.0, &["travel"], &[]),
        make_entry("second", Tier::Trial, 4.0, &["travel"], &[]),
    ];
    let prepared = PreparedQuery::new("travel");
    let scorer = QueryScorer::weighted(&prepared);

    let best = select_best_with(&scorer, &catalog, &HashSet::new()).unwrap();
    assert_eq!(best.entry.id, "first");
    assert_eq!(best.position, 0);
}

#[test]
fn test_tiebreak_only_orders_equal_matches() {
    let low = make_entry("low", Tier::Free, 1.0, &[], &["map"]);
    let high = make_entry_simple("high", Tier::Free, 5.0);

    let a = score("map", &low);
    let b = score("map", &high);
    assert!(a > b, "one keyword match ({}) must beat rating alone ({})", a, b);
}

#[test]
fn test_equal_relevance_and_rounded_rating_keep_catalog_order() {
    let catalog = vec![
        make_entry("listed-first", Tier::Sponsored, 4.91, &[], &["route"]),
        make_entry("listed-second", Tier::Sponsored, 4.94, &[], &["route"]),
    ];

    let selection = recommend("route", &catalog).unwrap();
    assert_eq!(selection.get("sponsoredTool").unwrap().id, "listed-first");
}

#[test]
fn test_haystack_ties_keep_catalog_order() {
    let catalog = vec![
        make_entry("listed-first", Tier::Trial, 4.0, &[], &["route"]),
        make_entry("listed-second", Tier::Trial, 4.4, &[], &["route"]),
    ];
    let assembler = Assembler::new(EngineConfig {
        profile: ScoringProfile::Haystack,
        fallback: FallbackPolicy::Strict,
        ..EngineConfig::default()
    });

    let selection = assembler.assemble("route", &catalog).unwrap();
    assert_eq!(selection.get("trialTool").unwrap().id, "listed-first");
    assert_eq!(selection.picks[2].score, Some(2.0));
}
