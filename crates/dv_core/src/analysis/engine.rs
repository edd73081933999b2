//! # Analysis Engine
//!
//! Single-pass batch orchestration over a materialized timeline. The
//! economy pipeline walks rounds in order because round N's starting
//! money depends on round N-1's reconstruction; everything else is
//! independent per round and fans out through rayon with sorted fan-in,
//! so the output is identical no matter how the work is scheduled.

use std::collections::BTreeMap;

use fxhash::FxHashMap;
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::afk::{detect_afk_for_round, AfkDetection};
use crate::analysis::config::AnalysisConfig;
use crate::analysis::economy::{
    classify_team_economy, reconstruct_round_economy, RoundEconomy, TeamRoundEconomy,
};
use crate::analysis::griefing::{aggregate_griefing, run_detectors, PlayerGriefingResult};
use crate::analysis::timeline::{RoundWindow, TimelineView};
use crate::error::Result;
use crate::models::{MatchTimeline, Round, Team};

/// Reconstructed team economies for one analyzed round, retained for
/// presentation drill-down.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct RoundAudit {
    pub round_number: u32,
    /// CT first, then T; a side with no reconstructed members is absent
    pub teams: Vec<TeamRoundEconomy>,
}

/// The engine's complete output for one match.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct MatchBehaviorReport {
    /// Player id -> whole-match griefing result; players with no events
    /// are absent
    pub griefing: BTreeMap<u64, PlayerGriefingResult>,
    /// All AFK detections in (round, player) order
    pub afk: Vec<AfkDetection>,
    /// Per-round reconstruction audit trail
    pub rounds: Vec<RoundAudit>,
    /// Rounds skipped as structurally invalid
    pub skipped_rounds: Vec<u32>,
}

/// Run the full behavioral analysis over one replay timeline.
///
/// Pure and deterministic: same timeline and config, same report. The
/// timeline is only borrowed; every derived entity is owned by the
/// returned report.
pub fn analyze_match(
    timeline: &MatchTimeline,
    config: &AnalysisConfig,
) -> Result<MatchBehaviorReport> {
    timeline.validate()?;
    let view = TimelineView::new(timeline);

    let mut resolved: Vec<(&Round, RoundWindow)> = Vec::new();
    let mut skipped_rounds = Vec::new();
    for round in &timeline.rounds {
        match view.resolve_round_window(round) {
            Some(window) => resolved.push((round, window)),
            None => {
                log::warn!("round {} is structurally invalid, skipping", round.number);
                skipped_rounds.push(round.number);
            }
        }
    }

    // Economy pipeline: sequential along the round axis, previous round's
    // output threaded explicitly into the next reconstruction
    let mut previous: Option<FxHashMap<u64, RoundEconomy>> = None;
    let mut rounds = Vec::with_capacity(resolved.len());
    let mut all_events = Vec::new();
    for (round, window) in &resolved {
        let economies =
            reconstruct_round_economy(&view, round, window, previous.as_ref(), config);

        let mut teams = Vec::new();
        for team in [Team::Ct, Team::T] {
            if let Some(team_economy) =
                classify_team_economy(team, round.number, &economies, config)
            {
                teams.push(team_economy);
            }
        }

        for team_economy in &teams {
            for player in &team_economy.members {
                all_events.extend(run_detectors(player, team_economy, config));
            }
        }

        rounds.push(RoundAudit { round_number: round.number, teams });
        previous = Some(economies);
    }

    let griefing = aggregate_griefing(all_events, config);

    // AFK tracking is independent per round; fan out and re-sort
    let mut afk: Vec<AfkDetection> = resolved
        .par_iter()
        .flat_map(|(round, window)| detect_afk_for_round(&view, round, window, config))
        .collect();
    afk.sort_by_key(|d| (d.round_number, d.player_id));

    Ok(MatchBehaviorReport { griefing, afk, rounds, skipped_rounds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frame, Loadout, PlayerSnapshot, WorldPos};

    fn snap(player_id: u64, team: Team) -> PlayerSnapshot {
        PlayerSnapshot {
            player_id,
            name: format!("p{}", player_id),
            team,
            hp: 100,
            alive: true,
            connected: true,
            pos: WorldPos { x: player_id as f64 * 100.0, y: 0.0, z: 0.0 },
            loadout: Loadout::default(),
            money: Some(800),
        }
    }

    fn frame(tick: u32, players: Vec<PlayerSnapshot>) -> Frame {
        Frame { tick, time: tick as f64 / 64.0, players, events: Vec::new() }
    }

    fn ten_players() -> Vec<PlayerSnapshot> {
        (1..=5)
            .map(|id| snap(id, Team::Ct))
            .chain((6..=10).map(|id| snap(id, Team::T)))
            .collect()
    }

    #[test]
    fn test_invalid_round_skipped_not_fatal() {
        let config = AnalysisConfig::default();
        let timeline = MatchTimeline {
            tick_rate: 64.0,
            frames: vec![frame(0, ten_players()), frame(64 * 6, ten_players())],
            rounds: vec![
                Round {
                    number: 1,
                    start_tick: 0,
                    freeze_end_tick: Some(0),
                    end_tick: Some(64 * 100),
                    winner: Some(Team::Ct),
                },
                // Starts far past the last frame
                Round {
                    number: 2,
                    start_tick: 64 * 10_000,
                    freeze_end_tick: None,
                    end_tick: None,
                    winner: None,
                },
            ],
        };
        let report = analyze_match(&timeline, &config).unwrap();
        assert_eq!(report.skipped_rounds, vec![2]);
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.rounds[0].round_number, 1);
    }

    #[test]
    fn test_empty_timeline_is_error() {
        let config = AnalysisConfig::default();
        let timeline = MatchTimeline { tick_rate: 64.0, frames: Vec::new(), rounds: Vec::new() };
        assert!(analyze_match(&timeline, &config).is_err());
    }

    #[test]
    fn test_audit_has_both_teams() {
        let config = AnalysisConfig::default();
        let timeline = MatchTimeline {
            tick_rate: 64.0,
            frames: vec![frame(0, ten_players()), frame(64 * 6, ten_players())],
            rounds: vec![Round {
                number: 1,
                start_tick: 0,
                freeze_end_tick: Some(0),
                end_tick: Some(64 * 100),
                winner: Some(Team::Ct),
            }],
        };
        let report = analyze_match(&timeline, &config).unwrap();
        assert_eq!(report.rounds[0].teams.len(), 2);
        assert_eq!(report.rounds[0].teams[0].team, Team::Ct);
        assert_eq!(report.rounds[0].teams[1].team, Team::T);
        // Quiet pistol round: nobody griefs, nobody is flagged
        assert!(report.griefing.values().all(|r| !r.flagged));
    }

    #[test]
    fn test_afk_ordering_across_rounds() {
        let config = AnalysisConfig::default();
        // Two rounds; everyone stands still for both
        let mut frames = Vec::new();
        for s in 0..=30u32 {
            frames.push(frame(s * 64, ten_players()));
        }
        for s in 40..=70u32 {
            frames.push(frame(s * 64, ten_players()));
        }
        let timeline = MatchTimeline {
            tick_rate: 64.0,
            frames,
            rounds: vec![
                Round {
                    number: 1,
                    start_tick: 0,
                    freeze_end_tick: Some(0),
                    end_tick: Some(30 * 64),
                    winner: Some(Team::Ct),
                },
                Round {
                    number: 2,
                    start_tick: 40 * 64,
                    freeze_end_tick: Some(40 * 64),
                    end_tick: Some(70 * 64),
                    winner: Some(Team::T),
                },
            ],
        };
        let report = analyze_match(&timeline, &config).unwrap();
        assert_eq!(report.afk.len(), 20);
        let keys: Vec<(u32, u64)> =
            report.afk.iter().map(|d| (d.round_number, d.player_id)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
