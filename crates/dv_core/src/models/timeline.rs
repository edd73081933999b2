use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::round::Round;
use crate::error::{AnalysisError, Result};

/// Team affiliation as reported by the replay parser.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    Ct,
    T,
    Spectator,
}

impl Team {
    /// Whether this side actually plays the round (spectators never do).
    pub fn is_playing(self) -> bool {
        !matches!(self, Team::Spectator)
    }

    pub fn opponent(self) -> Option<Team> {
        match self {
            Team::Ct => Some(Team::T),
            Team::T => Some(Team::Ct),
            Team::Spectator => None,
        }
    }
}

/// Position in map units.
///
/// AFK displacement is planar: the z axis carries crouch/jump noise and is
/// excluded from stillness checks.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPos {
    /// Euclidean distance in the xy plane.
    pub fn planar_distance_to(&self, other: &WorldPos) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Positions with non-finite components are treated as absent data.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Visible equipment of one player at one frame.
///
/// Weapon identifiers are raw parser strings; absence of a primary does not
/// imply the player has none, only that the source did not record it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema)]
pub struct Loadout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default)]
    pub grenades: Vec<String>,
    #[serde(default)]
    pub has_helmet: bool,
    #[serde(default)]
    pub has_defuser: bool,
    #[serde(default)]
    pub has_bomb: bool,
}

/// One player's state inside a frame.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct PlayerSnapshot {
    /// Stable across the whole match
    pub player_id: u64,
    pub name: String,
    pub team: Team,
    /// 0-100
    pub hp: u32,
    pub alive: bool,
    pub connected: bool,
    pub pos: WorldPos,
    #[serde(default)]
    pub loadout: Loadout,
    /// Money as observed by the parser; frequently absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<i32>,
}

impl PlayerSnapshot {
    /// Observed money with out-of-domain values (negative) treated as absent.
    pub fn observed_money(&self) -> Option<i32> {
        self.money.filter(|m| *m >= 0)
    }
}

/// A discretized simulation snapshot.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct Frame {
    pub tick: u32,
    /// Seconds since match start (tick / tick rate)
    pub time: f64,
    pub players: Vec<PlayerSnapshot>,
    /// Events that occurred at/near this tick
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn snapshot_of(&self, player_id: u64) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

/// The fully materialized replay timeline consumed by the engine.
///
/// Owned by the external parser; the engine only ever borrows it.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct MatchTimeline {
    /// Simulation ticks per second (64 for CS2 matchmaking demos)
    pub tick_rate: f64,
    /// Time-ordered frames
    pub frames: Vec<Frame>,
    /// Non-overlapping round boundaries, 1-based round numbers
    pub rounds: Vec<Round>,
}

impl MatchTimeline {
    /// Structural validation applied once at the engine boundary.
    ///
    /// Degraded content (missing snapshots, absent money, unknown weapons)
    /// is not an error; only shapes the engine cannot anchor to are.
    pub fn validate(&self) -> Result<()> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(AnalysisError::InvalidTickRate(self.tick_rate));
        }
        if self.frames.is_empty() {
            return Err(AnalysisError::InvalidTimeline("no frames".to_string()));
        }
        let ordered = self.frames.windows(2).all(|w| w[0].tick <= w[1].tick);
        if !ordered {
            return Err(AnalysisError::InvalidTimeline(
                "frame ticks must be non-decreasing".to_string(),
            ));
        }
        Ok(())
    }

    pub fn last_tick(&self) -> Option<u32> {
        self.frames.last().map(|f| f.tick)
    }
}
