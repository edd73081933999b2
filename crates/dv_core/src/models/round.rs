use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::timeline::Team;

/// One round's boundaries as reported by the parser.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct Round {
    /// 1-based, match-wide monotonic
    pub number: u32,
    pub start_tick: u32,
    /// Tick at which players regain movement/buy control; defaults to start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze_end_tick: Option<u32>,
    /// Absent for the open round at the end of a truncated demo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_tick: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Team>,
}

impl Round {
    /// Freeze end, defaulted to the round start and clamped to never
    /// precede it.
    pub fn freeze_end(&self) -> u32 {
        self.freeze_end_tick.map_or(self.start_tick, |t| t.max(self.start_tick))
    }

    /// Round end with an explicit fallback for open rounds.
    pub fn end_or(&self, fallback: u32) -> u32 {
        self.end_tick.unwrap_or(fallback)
    }

    pub fn won_by(&self, team: Team) -> Option<bool> {
        self.winner.map(|w| w == team)
    }
}
