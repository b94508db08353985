//! Fallback when a slot's partition is exhausted.

use crate::common::{assert_distinct, make_entry, make_entry_simple};
use scout::{recommend, Assembler, EngineConfig, FallbackPolicy, Tier};

fn strict() -> Assembler {
    Assembler::new(EngineConfig {
        fallback: FallbackPolicy::Strict,
        ..EngineConfig::default()
    })
}

#[test]
fn test_missing_tier_filled_from_best_remaining() {
    let catalog = vec![
        make_entry("s1", Tier::Sponsored, 4.9, &[], &["route"]),
        make_entry("f1", Tier::Free, 4.0, &[], &[]),
        make_entry("f2", Tier::Free, 4.2, &[], &["route", "optimizer"]),
    ];

    let selection = recommend("route optimizer", &catalog).unwrap();
    assert_eq!(selection.get("sponsoredTool").unwrap().id, "s1");
    assert_eq!(selection.get("freeTool").unwrap().id, "f2");

    let trial = &selection.picks[2];
    assert_eq!(trial.slot, "trialTool");
    assert_eq!(trial.entry.map(|e| e.id.as_str()), Some("f1"));
    assert!(trial.fallback, "Pick from another tier must be flagged");
    assert_distinct(&selection);
}

#[test]
fn test_fallback_never_repeats_an_earlier_pick() {
    let catalog = vec![make_entry_simple("only", Tier::Trial, 4.0)];

    let selection = recommend("anything", &catalog).unwrap();
    assert_eq!(selection.get("sponsoredTool").unwrap().id, "only");
    assert!(selection.picks[0].fallback);
    assert!(selection.get("freeTool").is_none());
    assert!(
        selection.get("trialTool").is_none(),
        "The trial entry was already used by the first slot"
    );
}

#[test]
fn test_strict_keeps_partitions_separate() {
    let catalog = vec![
        make_entry("s1", Tier::Sponsored, 4.9, &[], &["route"]),
        make_entry("s2", Tier::Sponsored, 4.8, &[], &["route"]),
        make_entry("t1", Tier::Trial, 3.0, &[], &[]),
    ];

    let selection = strict().assemble("route", &catalog).unwrap();
    assert_eq!(selection.get("sponsoredTool").unwrap().id, "s1");
    assert!(selection.get("freeTool").is_none());
    assert_eq!(selection.get("trialTool").unwrap().id, "t1");
    assert!(selection.picks.iter().all(|p| !p.fallback));
}

#[test]
fn test_strict_never_uses_other_tiers() {
    let catalog = vec![
        make_entry_simple("f1", Tier::Free, 5.0),
        make_entry_simple("m1", Tier::Freemium, 5.0),
    ];

    let selection = strict().assemble("tool", &catalog).unwrap();
    for pick in &selection.picks {
        if let Some(entry) = pick.entry {
            assert_eq!(pick.slot, "freeTool", "{} leaked into {}", entry.id, pick.slot);
        }
    }
}

#[test]
fn test_freemium_only_reached_through_fallback() {
    let catalog = vec![make_entry("m1", Tier::Freemium, 4.0, &[], &["budget"])];
    let selection = recommend("budget", &catalog).unwrap();

    assert_eq!(selection.get("sponsoredTool").unwrap().id, "m1");
    assert_eq!(selection.entries().count(), 1);
}
