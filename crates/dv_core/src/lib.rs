//! # dv_core - Behavioral Analytics Engine for CS2 Match Replays
//!
//! This library derives behavioral judgments from a parsed match replay:
//! per-round economy reconstruction, heuristic griefing detection with
//! per-pattern confidence, and AFK tracking against a grace window.
//!
//! ## Features
//! - Pure single-pass batch computation (same timeline = same report)
//! - Best-effort inference that degrades gracefully on missing data
//! - Every threshold injectable through one configuration structure
//! - JSON API for easy integration with viewer frontends

// Allow unused code for detectors under development
#![allow(dead_code)]
// Analytics records legitimately carry many numeric fields
#![allow(clippy::too_many_arguments)]
// Large enum variants - boxing would require API changes
#![allow(clippy::large_enum_variant)]

pub mod analysis;
pub mod api;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{analyze_match_json, AnalyzeRequest, AnalyzeResponse};
pub use error::{AnalysisError, Result};

// Re-export the engine surface
pub use analysis::{
    analyze_match, AfkDetection, AnalysisConfig, DetectorWeights, GriefingEvent,
    GriefingEventType, MatchBehaviorReport, PlayerGriefingResult, RoundEconomy, TeamBuyState,
    TeamRoundEconomy,
};

// Re-export the timeline input shapes
pub use models::{
    Frame, GameEvent, Loadout, MatchTimeline, PlayerSnapshot, Round, Team, WorldPos,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
