//! Engine configuration.
//!
//! Every field has a default, so `{}` is a complete config. Keys are camelCase
//! to match the catalog format.
//!
//! ```json
//! {
//!   "profile": "weighted",
//!   "weights": { "category": 3, "keywordToken": 4, "keywordPhrase": 2 },
//!   "emptyQuery": "rating-order",
//!   "fallback": "any-tier",
//!   "layout": "three-slot"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assemble::{EmptyQueryPolicy, FallbackPolicy, LayoutKind};
use crate::error::ConfigError;
use crate::scoring::{ScoreWeights, ScoringProfile, MAX_TIEBREAK};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub profile: ScoringProfile,
    pub weights: ScoreWeights,
    pub empty_query: EmptyQueryPolicy,
    pub fallback: FallbackPolicy,
    pub layout: LayoutKind,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), ?config, "engine config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights
            .validate()
            .map_err(|(name, value)| ConfigError::InvalidWeight {
                name,
                value,
                max_tiebreak: MAX_TIEBREAK,
            })
    }
}
