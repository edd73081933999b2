//! # Griefing Detection Module
//!
//! Six independent heuristic detectors over reconstructed round economies,
//! plus the whole-match aggregation that separates demonstrated patterns
//! from one-off anomalies.
//!
//! - `detectors` - the per-pattern scoring functions
//! - `aggregator` - cross-round roll-up, repeat boosting, flag decision

pub mod aggregator;
pub mod detectors;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use aggregator::{aggregate_griefing, PlayerGriefingResult};
pub use detectors::run_detectors;

/// The suspicious pattern a detector scores.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum GriefingEventType {
    RefuseToBuyWithMoney,
    PermaForceBuyAgainstTeamEconomy,
    TrollBuys,
    WeaponDonationToEnemy,
    HoardMoneyWhileTeamNeedsBuy,
    BuyThenSuicidePeek,
}

/// One detector's verdict for one player in one round. Immutable once
/// produced; the aggregator adjusts copies, never the originals it was
/// handed.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct GriefingEvent {
    pub event_type: GriefingEventType,
    pub round_number: u32,
    pub player_id: u64,
    pub player_name: String,
    /// Unbounded positive, weight x situational multipliers
    pub score: f64,
    /// 0-1, saturating transform of the score
    pub confidence: f64,
    /// The inputs the score was computed from, keyed for presentation.
    /// BTreeMap keeps serialized output stable across runs.
    pub features: BTreeMap<String, serde_json::Value>,
    /// Built from the same inputs as the score; no hidden state
    pub human_reason: String,
}

/// Saturating confidence transform: approaches 1 as the score grows,
/// crosses 0.5 at `half_point`.
pub(crate) fn saturating_confidence(score: f64, half_point: f64) -> f64 {
    if score <= 0.0 || !score.is_finite() {
        return 0.0;
    }
    (score / (score + half_point)).clamp(0.0, 1.0)
}
