//! # Analysis Module
//!
//! The behavioral analytics engine: economy reconstruction, griefing
//! detection, and AFK tracking over a parsed replay timeline.
//!
//! ## Submodules
//!
//! - `timeline` - read-only accessor over frames and round boundaries
//! - `economy` - per-round economic reconstruction and team buy states
//! - `griefing` - detector bank and whole-match aggregation
//! - `afk` - per-round stillness state machine
//! - `engine` - single-pass orchestration producing the combined report
//! - `config` - every tunable threshold in one structure

pub mod afk;
pub mod config;
pub mod economy;
pub mod engine;
pub mod griefing;
pub mod timeline;


pub use afk::AfkDetection;
pub use config::{AnalysisConfig, DetectorWeights};
pub use economy::{RoundEconomy, TeamBuyState, TeamRoundEconomy};
pub use engine::{analyze_match, MatchBehaviorReport, RoundAudit};
pub use griefing::{GriefingEvent, GriefingEventType, PlayerGriefingResult};
pub use timeline::{RoundWindow, TimelineView};
