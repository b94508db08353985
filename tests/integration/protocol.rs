//! The JSON message boundary.

use crate::common::{write_temp_catalog, TRAVEL_CATALOG};
use scout::{Assembler, Catalog, CatalogStore, EmptyQueryPolicy, EngineConfig, Request, Service};
use serde_json::json;
use std::fs;
use std::sync::Arc;

fn builtin_service(config: EngineConfig) -> Service {
    let store = CatalogStore::new(Catalog::builtin().unwrap());
    Service::new(Arc::new(store), Assembler::new(config))
}

#[test]
fn test_request_decoding() {
    let request: Request =
        serde_json::from_str(r#"{"type":"SCOUT_GET_RECS","query":"trip"}"#).unwrap();
    assert_eq!(
        request,
        Request::GetRecs {
            query: Some("trip".to_string())
        }
    );

    let request: Request = serde_json::from_str(r#"{"type":"SCOUT_GET_RECS","query":null}"#).unwrap();
    assert_eq!(request, Request::GetRecs { query: None });

    let request: Request = serde_json::from_str(r#"{"type":"SCOUT_RELOAD_CATALOG"}"#).unwrap();
    assert_eq!(request, Request::ReloadCatalog);
}

#[test]
fn test_reply_has_every_slot() {
    let reply = builtin_service(EngineConfig::default())
        .handle(&Request::GetRecs {
            query: Some("plan my vacation".to_string()),
        });

    assert_eq!(reply["ok"], true);
    assert_eq!(reply["freeTool"]["id"], "wonderplan");
    for slot in ["sponsoredTool", "freeTool", "trialTool"] {
        assert!(reply.get(slot).is_some(), "missing slot {}", slot);
    }
}

#[test]
fn test_empty_query_default_policy_served() {
    let reply = builtin_service(EngineConfig::default())
        .handle_json(r#"{"type":"SCOUT_GET_RECS","query":""}"#);
    assert_eq!(reply["ok"], true);
    assert_eq!(reply["sponsoredTool"]["id"], "routegenix-ai");
}

#[test]
fn test_empty_query_reject_policy() {
    let service = builtin_service(EngineConfig {
        empty_query: EmptyQueryPolicy::Reject,
        ..EngineConfig::default()
    });
    let reply = service.handle_json(r#"{"type":"SCOUT_GET_RECS","query":"   "}"#);
    assert_eq!(reply, json!({ "ok": false, "error": "missing query" }));
}

#[test]
fn test_reload_through_message() {
    let original = fs::read_to_string(TRAVEL_CATALOG).unwrap();
    let (_dir, path) = write_temp_catalog(&original);
    let store = Arc::new(CatalogStore::open(&path).unwrap());
    let service = Service::new(Arc::clone(&store), Assembler::default());

    fs::write(
        &path,
        r#"{"version":1,"tools":[{"id":"solo","tier":"sponsored","name":"Solo","url":"https://solo","rating":3.0}]}"#,
    )
    .unwrap();
    let reply = service.handle_json(r#"{"type":"SCOUT_RELOAD_CATALOG"}"#);
    assert_eq!(reply["ok"], true);
    assert_eq!(reply["entries"], 1);
    assert_eq!(reply["fingerprint"], store.snapshot().fingerprint_hex());

    let reply = service.handle_json(r#"{"type":"SCOUT_GET_RECS","query":"trip"}"#);
    assert_eq!(reply["sponsoredTool"]["id"], "solo");
    assert!(reply["freeTool"].is_null());
}

#[test]
fn test_failed_reload_reply() {
    let original = fs::read_to_string(TRAVEL_CATALOG).unwrap();
    let (_dir, path) = write_temp_catalog(&original);
    let service = Service::new(
        Arc::new(CatalogStore::open(&path).unwrap()),
        Assembler::default(),
    );

    fs::write(&path, r#"[{"id":"","tier":"free","name":"Blank","url":"https://x"}]"#).unwrap();
    let reply = service.handle_json(r#"{"type":"SCOUT_RELOAD_CATALOG"}"#);
    assert_eq!(reply["ok"], false);
    assert!(reply["error"].as_str().unwrap().contains("empty id"));

    // Old catalog still answers.
    let reply = service.handle_json(r#"{"type":"SCOUT_GET_RECS","query":"trip"}"#);
    assert_eq!(reply["trialTool"]["id"], "tripplanner");
}

#[test]
fn test_malformed_messages_never_panic() {
    let service = builtin_service(EngineConfig::default());
    for message in ["", "null", "[]", r#"{"type":42}"#, r#"{"query":"x"}"#, "{"] {
        let reply = service.handle_json(message);
        assert_eq!(reply["ok"], false, "message {:?}", message);
    }
}
