// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Catalog loading, validation and hot-swap.
//!
//! A `Catalog` is validated once at construction and immutable afterwards.
//! Requests work on an `Arc<Catalog>` snapshot taken from [`CatalogStore`];
//! a reload builds and validates a whole new catalog before swapping the
//! pointer, so an in-flight request never sees a half-loaded catalog and a
//! bad file never replaces a good one.
//!
//! # Accepted formats
//!
//! ```text
//! [ { "id": ..., "tier": ..., ... }, ... ]           bare array
//! { "version": 1, "tools": [ ... ] }                 versioned object
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::scoring::MAX_RATING;
use crate::types::{CatalogEntry, Tier};

/// Catalog format version this build reads.
pub const CATALOG_VERSION: u32 = 1;

/// The catalog compiled into the binary, used when no file is given.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Deserialize)]
struct VersionedCatalog {
    version: u32,
    tools: Vec<CatalogEntry>,
}

/// Validated, immutable list of entries in authoring order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    fingerprint: u32,
}

impl Catalog {
    /// Validate entries and build a catalog.
    ///
    /// Rejects the whole list on the first empty id, duplicate id or rating
    /// outside `0.0..=5.0`. Nothing is skipped silently.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if let Some(&first) = seen.get(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: entry.id.clone(),
                    first,
                    second: index,
                });
            }
            seen.insert(&entry.id, index);

            if !entry.rating.is_finite() || !(0.0..=MAX_RATING).contains(&entry.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: entry.id.clone(),
                    rating: entry.rating,
                });
            }
        }

        let fingerprint = crc32fast::hash(&serde_json::to_vec(&entries)?);
        Ok(Self {
            entries,
            fingerprint,
        })
    }

    /// Parse either accepted JSON shape and validate.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let entries = if value.is_array() {
            serde_json::from_value::<Vec<CatalogEntry>>(value)?
        } else {
            let versioned: VersionedCatalog = serde_json::from_value(value)?;
            if versioned.version != CATALOG_VERSION {
                return Err(CatalogError::UnsupportedVersion(versioned.version));
            }
            versioned.tools
        };
        Self::from_entries(entries)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            fingerprint = %catalog.fingerprint_hex(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The embedded default catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose tier is in `tiers`, in catalog order.
    pub fn partition<'a>(&'a self, tiers: &'a [Tier]) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |e| tiers.contains(&e.tier))
    }

    /// Entry count per tier, every tier listed.
    pub fn tier_counts(&self) -> Vec<(Tier, usize)> {
        Tier::ALL
            .into_iter()
            .map(|tier| (tier, self.entries.iter().filter(|e| e.tier == tier).count()))
            .collect()
    }

    /// CRC32 of the canonical JSON of all entries.
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    pub fn fingerprint_hex(&self) -> String {
        format!("{:08x}", self.fingerprint)
    }
}

/// Process-wide holder of the current catalog snapshot.
///
/// The lock is held only long enough to clone or replace the `Arc`; scoring
/// always runs on a snapshot with no lock held.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
    source: Option<PathBuf>,
}

impl CatalogStore {
    /// Store without a backing file. `reload` re-reads the builtin catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            source: None,
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let catalog = Catalog::load(&path)?;
        Ok(Self {
            current: RwLock::new(Arc::new(catalog)),
            source: Some(path),
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Current snapshot. Stays valid after later swaps.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot, returning the previous one.
    pub fn swap(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        tracing::debug!(
            previous = %previous.fingerprint_hex(),
            "catalog snapshot swapped"
        );
        previous
    }

    /// Re-read the source and swap it in. On error the current snapshot stays.
    pub fn reload(&self) -> Result<Arc<Catalog>, CatalogError> {
        let loaded = match &self.source {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(),
        };
        match loaded {
            Ok(catalog) => {
                self.swap(catalog);
                Ok(self.snapshot())
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog reload rejected, keeping current snapshot");
                Err(err)
            }
        }
    }
}
