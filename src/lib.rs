//! Tool recommendations for free-text queries.
//!
//! Given a query and a catalog of tools, scout picks one tool per output slot:
//! the most relevant sponsored tool, the most relevant free tool, and so on.
//! A tool never fills two slots of one result, and identical inputs always give
//! identical output. Empty partitions fall back to the rest of the catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  utils.rs   │────▶│  scoring/    │────▶│  select.rs  │────▶│ assemble.rs  │
//! │ (normalize, │     │ (score,      │     │ (select_best│     │ (slots,      │
//! │  tokenize)  │     │  ranking)    │     │  rank)      │     │  fallback)   │
//! └─────────────┘     └──────────────┘     └─────────────┘     └──────────────┘
//!                                                                      │
//!        ┌──────────────┐        ┌──────────────┐                      ▼
//!        │ catalog.rs   │───────▶│ protocol.rs  │◀──────────── Selection
//!        │ (load, swap) │        │ (messages)   │
//!        └──────────────┘        └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use scout::{recommend, Catalog};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let selection = recommend("best multi-stop route optimizer", catalog.entries()).unwrap();
//!
//! let sponsored = selection.get("sponsoredTool").unwrap();
//! assert_eq!(sponsored.id, "routegenix-ai");
//! ```

// Module declarations
pub mod assemble;
pub mod catalog;
pub mod config;
pub mod contracts;
pub mod error;
pub mod protocol;
mod scoring;
mod select;
#[doc(hidden)]
pub mod testing;
mod types;
mod utils;

// Re-exports for public API
pub use assemble::{
    recommend, Assembler, EmptyQueryPolicy, FallbackPolicy, LayoutKind, Selection, SlotLayout,
    SlotPick, SlotSpec,
};
pub use catalog::{Catalog, CatalogStore, CATALOG_VERSION};
pub use config::EngineConfig;
pub use error::{CatalogError, ConfigError, RecommendError};
pub use protocol::{Request, Response, Service};
pub use scoring::ranking::{best_candidate, compare_candidates, Candidate, TieBreak};
pub use scoring::{
    rating_tiebreak, score, PreparedQuery, QueryScorer, ScoreWeights, ScoringProfile,
    CATEGORY_WEIGHT, KEYWORD_PHRASE_WEIGHT, KEYWORD_TOKEN_WEIGHT, MAX_RATING, MAX_TIEBREAK,
};
pub use select::{rank, select_best, select_best_with};
pub use types::{CatalogEntry, Tier};
pub use utils::{normalize, token_set, tokenize};
