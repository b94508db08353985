//! Identical inputs give identical outputs.

use crate::common::{picked_ids, travel_catalog};
use scout::{recommend, Assembler, EngineConfig, LayoutKind};

#[test]
fn test_repeated_requests_identical() {
    let catalog = travel_catalog();
    let queries = ["", "trip", "multi-stop route", "budget", "zzz"];

    for query in queries {
        let first = recommend(query, catalog.entries()).unwrap();
        for _ in 0..10 {
            let again = recommend(query, catalog.entries()).unwrap();
            assert_eq!(picked_ids(&first), picked_ids(&again), "query {:?}", query);
        }
    }
}

#[test]
fn test_serialized_output_identical() {
    let catalog = travel_catalog();
    let assembler = Assembler::new(EngineConfig {
        layout: LayoutKind::Tiered,
        ..EngineConfig::default()
    });

    let a = serde_json::to_string(&assembler.assemble("travel", catalog.entries()).unwrap()).unwrap();
    let b = serde_json::to_string(&assembler.assemble("travel", catalog.entries()).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_concurrent_requests_agree() {
    let catalog = travel_catalog();
    let expected = picked_ids(&recommend("route trip", catalog.entries()).unwrap());

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| picked_ids(&recommend("route trip", catalog.entries()).unwrap())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
