// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the scout command-line interface.
//!
//! Five subcommands: `recommend` fills the result slots for one query,
//! `score` shows how every tool ranks, `inspect` summarizes a catalog,
//! `batch` runs a file of queries in parallel, and `serve` answers JSON
//! messages line by line on stdin/stdout.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use scout::{EmptyQueryPolicy, EngineConfig, FallbackPolicy, LayoutKind, ScoringProfile};

#[derive(Parser)]
#[command(
    name = "scout",
    about = "Tier-diverse tool recommendations for free-text queries",
    version
)]
pub struct Cli {
    /// Catalog JSON file (defaults to the built-in catalog)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Engine config JSON file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick one tool per slot for a query
    Recommend {
        /// Search query (may be empty)
        query: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Print the wire JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Score every tool against a query, best first
    Score {
        /// Search query
        query: String,

        /// Maximum number of rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Scoring profile
        #[arg(long, value_enum)]
        profile: Option<ProfileArg>,

        #[arg(long)]
        json: bool,
    },

    /// Summarize a catalog: tiers, ratings, fingerprint
    Inspect {
        #[arg(long)]
        json: bool,
    },

    /// Recommend for every line of a file, writing JSON lines
    Batch {
        /// File with one query per line
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Answer newline-delimited JSON messages on stdin
    Serve {
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Flags that override the config file.
#[derive(clap::Args, Debug, Default)]
pub struct PolicyArgs {
    /// Result layout
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// What to do when a slot's tier has nothing left
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackArg>,

    /// Fail on an empty query instead of ranking by rating
    #[arg(long)]
    pub require_query: bool,

    /// Scoring profile
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,
}

impl PolicyArgs {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(layout) = self.layout {
            config.layout = layout.into();
        }
        if let Some(fallback) = self.fallback {
            config.fallback = fallback.into();
        }
        if self.require_query {
            config.empty_query = EmptyQueryPolicy::Reject;
        }
        if let Some(profile) = self.profile {
            config.profile = profile.into();
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LayoutArg {
    ThreeSlot,
    Tiered,
}

impl From<LayoutArg> for LayoutKind {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::ThreeSlot => LayoutKind::ThreeSlot,
            LayoutArg::Tiered => LayoutKind::Tiered,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FallbackArg {
    AnyTier,
    Strict,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::AnyTier => FallbackPolicy::AnyTier,
            FallbackArg::Strict => FallbackPolicy::Strict,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProfileArg {
    Weighted,
    Haystack,
}

impl From<ProfileArg> for ScoringProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Weighted => ScoringProfile::Weighted,
            ProfileArg::Haystack => ScoringProfile::Haystack,
        }
    }
}
