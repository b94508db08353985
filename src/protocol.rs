// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request/response messages at the engine boundary.
//!
//! The transport is somebody else's problem: a browser extension port, a
//! socket, or `scout serve` reading stdin. This module only maps one JSON
//! message to one JSON reply. Every reply carries `ok`; a failure is a reply,
//! never a dropped message or a panic.
//!
//! # Messages
//!
//! ```text
//! → {"type":"SCOUT_GET_RECS","query":"multi-stop route"}
//! ← {"ok":true,"sponsoredTool":{...},"freeTool":{...},"trialTool":null}
//!
//! → {"type":"SCOUT_GET_RECS","query":""}               (reject policy)
//! ← {"ok":false,"error":"missing query"}
//!
//! → {"type":"SCOUT_RELOAD_CATALOG"}
//! ← {"ok":true,"entries":3,"fingerprint":"1c2d3e4f"}
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::assemble::{Assembler, Selection};
use crate::catalog::CatalogStore;

/// Incoming message, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "SCOUT_GET_RECS")]
    GetRecs {
        /// Missing or `null` is treated as the empty query.
        #[serde(default)]
        query: Option<String>,
    },
    #[serde(rename = "SCOUT_RELOAD_CATALOG")]
    ReloadCatalog,
}

/// Outgoing message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response<'a> {
    Recommendations {
        ok: bool,
        #[serde(flatten)]
        selection: Selection<'a>,
    },
    Reloaded {
        ok: bool,
        entries: usize,
        fingerprint: String,
    },
    Failure {
        ok: bool,
        error: String,
    },
}

impl<'a> Response<'a> {
    pub fn recommendations(selection: Selection<'a>) -> Self {
        Response::Recommendations {
            ok: true,
            selection,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Response::Failure {
            ok: false,
            error: error.into(),
        }
    }
}

/// Catalog store plus assembler: everything needed to answer messages.
#[derive(Debug, Clone)]
pub struct Service {
    store: Arc<CatalogStore>,
    assembler: Assembler,
}

impl Service {
    pub fn new(store: Arc<CatalogStore>, assembler: Assembler) -> Self {
        Self { store, assembler }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    /// Answer one decoded request.
    pub fn handle(&self, request: &Request) -> Value {
        match request {
            Request::GetRecs { query } => {
                let query = query.as_deref().unwrap_or("");
                let snapshot = self.store.snapshot();
                let response = match self.assembler.assemble(query, snapshot.entries()) {
                    Ok(selection) => {
                        tracing::debug!(
                            query,
                            catalog = %snapshot.fingerprint_hex(),
                            picked = selection.entries().count(),
                            "recommendations served"
                        );
                        Response::recommendations(selection)
                    }
                    Err(err) => Response::failure(err.to_string()),
                };
                to_json(&response)
            }
            Request::ReloadCatalog => match self.store.reload() {
                Ok(catalog) => to_json(&Response::Reloaded {
                    ok: true,
                    entries: catalog.len(),
                    fingerprint: catalog.fingerprint_hex(),
                }),
                Err(err) => to_json(&Response::failure(err.to_string())),
            },
        }
    }

    /// Decode one JSON message and answer it. Malformed input gets a failure
    /// reply.
    pub fn handle_json(&self, message: &str) -> Value {
        match serde_json::from_str::<Request>(message) {
            Ok(request) => self.handle(&request),
            Err(err) => {
                tracing::warn!(error = %err, "unreadable message");
                to_json(&Response::failure(format!("invalid message: {}", err)))
            }
        }
    }
}

fn to_json(response: &Response<'_>) -> Value {
    serde_json::to_value(response)
        .unwrap_or_else(|err| json!({ "ok": false, "error": err.to_string() }))
}
