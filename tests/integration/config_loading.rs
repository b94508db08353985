//! Engine config files.

use crate::common::{travel_catalog, write_temp_catalog};
use scout::{
    Assembler, ConfigError, EmptyQueryPolicy, EngineConfig, FallbackPolicy, LayoutKind,
    ScoringProfile,
};
use std::path::Path;

#[test]
fn test_load_config_file() {
    let (_dir, path) = write_temp_catalog(
        r#"{ "emptyQuery": "reject", "fallback": "strict", "layout": "tiered" }"#,
    );
    let config = EngineConfig::load(&path).unwrap();

    assert_eq!(config.empty_query, EmptyQueryPolicy::Reject);
    assert_eq!(config.fallback, FallbackPolicy::Strict);
    assert_eq!(config.layout, LayoutKind::Tiered);
    assert_eq!(config.profile, ScoringProfile::Weighted);

    let catalog = travel_catalog();
    let assembler = Assembler::new(config);
    assert!(assembler.assemble(" ", catalog.entries()).is_err());
    assert_eq!(assembler.assemble("trip", catalog.entries()).unwrap().picks.len(), 2);
}

#[test]
fn test_missing_config_file() {
    let err = EngineConfig::load(Path::new("tests/fixtures/no_such_config.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_weight_at_or_below_tiebreak_rejected() {
    let err = EngineConfig::from_json_str(r#"{ "weights": { "category": 0.5 } }"#).unwrap_err();
    match err {
        ConfigError::InvalidWeight { name, value, .. } => {
            assert_eq!(name, "category");
            assert_eq!(value, 0.5);
        }
        other => panic!("expected invalid weight, got {}", other),
    }
}

#[test]
fn test_zero_weight_disables_signal() {
    let config =
        EngineConfig::from_json_str(r#"{ "weights": { "keywordPhrase": 0 } }"#).unwrap();
    assert_eq!(config.weights.keyword_phrase, 0.0);
}

#[test]
fn test_unknown_policy_rejected() {
    assert!(matches!(
        EngineConfig::from_json_str(r#"{ "fallback": "sometimes" }"#),
        Err(ConfigError::Parse(_))
    ));
}
