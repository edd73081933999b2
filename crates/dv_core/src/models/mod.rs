//! Replay timeline data model
//!
//! Read-only input shapes produced by the external replay parser:
//! - `timeline`: frames, player snapshots, loadouts, the match container
//! - `round`: round boundaries and winners
//! - `events`: the tagged union of discrete replay facts
//!
//! The engine borrows these; it never mutates or re-emits them.

pub mod events;
pub mod round;
pub mod timeline;

#[cfg(test)]
pub mod proptest_gen;

pub use events::{
    BombDefuseEvent, BombPlantEvent, ChatEvent, DamageEvent, GameEvent, KillEvent,
};
pub use round::Round;
pub use timeline::{Frame, Loadout, MatchTimeline, PlayerSnapshot, Team, WorldPos};
