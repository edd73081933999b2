use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Event enumeration - all discrete facts recorded by the parser.
///
/// One variant per kind, each carrying only the fields relevant to that
/// kind. Events are immutable inputs; the engine never synthesizes them.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(tag = "etype")]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    Kill(KillEvent),
    Damage(DamageEvent),
    Chat(ChatEvent),
    BombPlant(BombPlantEvent),
    BombDefuse(BombDefuseEvent),
}

impl GameEvent {
    pub fn tick(&self) -> u32 {
        match self {
            GameEvent::Kill(e) => e.tick,
            GameEvent::Damage(e) => e.tick,
            GameEvent::Chat(e) => e.tick,
            GameEvent::BombPlant(e) => e.tick,
            GameEvent::BombDefuse(e) => e.tick,
        }
    }
}

/// A player death. `attacker` is absent for world deaths (fall damage,
/// bomb detonation).
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct KillEvent {
    pub tick: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker: Option<String>,
    pub victim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
    #[serde(default)]
    pub headshot: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct DamageEvent {
    pub tick: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker: Option<String>,
    pub victim: String,
    pub amount: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct ChatEvent {
    pub tick: u32,
    pub sender: String,
    pub message: String,
    /// true for team-only chat
    #[serde(default)]
    pub team_only: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct BombPlantEvent {
    pub tick: u32,
    pub player: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct BombDefuseEvent {
    pub tick: u32,
    pub player: String,
}
