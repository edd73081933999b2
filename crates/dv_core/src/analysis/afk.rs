//! # AFK Tracker
//!
//! Per-(round, player) stillness state machine:
//! `Unseen -> Tracking -> {Moved | Died | RoundEnded}`.
//!
//! Runs directly off the timeline accessor and shares no state with the
//! economy pipeline. Movement is planar displacement from the anchor
//! position recorded at first appearance, so crouch jitter below the
//! epsilon never ends a track and a slow crawl still counts once total
//! displacement crosses it.

use std::collections::hash_map::Entry;

use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::timeline::{RoundWindow, TimelineView};
use crate::models::{Round, WorldPos};

/// One detected stillness interval.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct AfkDetection {
    pub player_id: u64,
    pub player_name: String,
    pub round_number: u32,
    pub start_afk_tick: u32,
    pub end_afk_tick: u32,
    pub duration_secs: f64,
    /// Death ended the interval rather than movement or the round
    pub died_while_afk: bool,
    /// Seconds from the AFK start to the first movement, when any occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_movement_secs: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackState {
    Tracking,
    Moved,
    Died,
    RoundEnded,
}

struct PlayerTrack {
    player_id: u64,
    name: String,
    anchor: WorldPos,
    first_seen_tick: u32,
    state: TrackState,
    first_movement_tick: Option<u32>,
    death_tick: Option<u32>,
    moved_during_grace: bool,
    late_joiner: bool,
}

/// Track every player through one round's window and emit detections.
///
/// Results are sorted by player id; the caller interleaves rounds.
pub fn detect_afk_for_round(
    view: &TimelineView,
    round: &Round,
    window: &RoundWindow,
    config: &AnalysisConfig,
) -> Vec<AfkDetection> {
    let grace_end_tick =
        window.freeze_end_tick.saturating_add(view.ticks(config.grace_period_secs));

    // Players start Unseen by simply not having a track yet
    let mut tracks: FxHashMap<u64, PlayerTrack> = FxHashMap::default();

    for frame in view.frames_between(window.freeze_end_tick, window.end_tick) {
        for snap in &frame.players {
            if !snap.connected || !snap.team.is_playing() {
                continue;
            }

            let track = match tracks.entry(snap.player_id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    // First appearance; a dead or position-less snapshot
                    // cannot anchor a track
                    if snap.alive && snap.pos.is_valid() {
                        entry.insert(PlayerTrack {
                            player_id: snap.player_id,
                            name: snap.name.clone(),
                            anchor: snap.pos,
                            first_seen_tick: frame.tick,
                            state: TrackState::Tracking,
                            first_movement_tick: None,
                            death_tick: None,
                            moved_during_grace: false,
                            late_joiner: frame.tick > grace_end_tick,
                        });
                    }
                    continue;
                }
            };

            if track.state != TrackState::Tracking {
                continue;
            }

            if !snap.alive {
                track.state = TrackState::Died;
                track.death_tick = Some(frame.tick);
                continue;
            }

            if !snap.pos.is_valid() {
                continue;
            }

            if track.anchor.planar_distance_to(&snap.pos) > config.movement_epsilon {
                track.first_movement_tick = Some(frame.tick);
                if frame.tick <= grace_end_tick {
                    track.moved_during_grace = true;
                }
                track.state = TrackState::Moved;
            }
        }
    }

    let mut detections: Vec<AfkDetection> = tracks
        .into_values()
        .map(|mut track| {
            if track.state == TrackState::Tracking {
                track.state = TrackState::RoundEnded;
            }
            track
        })
        .filter_map(|track| emit(view, round, window, config, track))
        .collect();
    detections.sort_by_key(|d| d.player_id);
    detections
}

fn emit(
    view: &TimelineView,
    round: &Round,
    window: &RoundWindow,
    config: &AnalysisConfig,
    track: PlayerTrack,
) -> Option<AfkDetection> {
    // Movement inside the grace window exempts the round outright
    if track.moved_during_grace {
        return None;
    }
    // Late joiners only count while they never moved at all
    if track.late_joiner && track.first_movement_tick.is_some() {
        return None;
    }

    let start_afk_tick = if track.late_joiner {
        track.first_seen_tick
    } else {
        window.freeze_end_tick
    };
    let end_afk_tick = track
        .first_movement_tick
        .or(track.death_tick)
        .unwrap_or(window.end_tick);

    let duration_secs = view.secs_between(start_afk_tick, end_afk_tick);
    if duration_secs < config.afk_threshold_secs {
        return None;
    }

    Some(AfkDetection {
        player_id: track.player_id,
        player_name: track.name,
        round_number: round.number,
        start_afk_tick,
        end_afk_tick,
        duration_secs,
        died_while_afk: track.first_movement_tick.is_none() && track.death_tick.is_some(),
        time_to_first_movement_secs: track
            .first_movement_tick
            .map(|tick| view.secs_between(start_afk_tick, tick)),
    })
}
