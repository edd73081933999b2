//! # Griefing Aggregator
//!
//! Whole-match roll-up of detector events per player. A pattern that
//! repeats across rounds is worth more than the sum of its occurrences;
//! a one-off anomaly is worth less than its raw score suggests. The boost
//! is applied per event type, then scores are summed, confidences
//! averaged, and the flag decision taken against a fixed threshold.

use std::collections::BTreeMap;

use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::griefing::{GriefingEvent, GriefingEventType};

/// Everything the match produced about one player's economic behavior.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct PlayerGriefingResult {
    pub player_id: u64,
    pub player_name: String,
    /// All events, repeat-adjusted, in (round, detector) order
    pub events: Vec<GriefingEvent>,
    /// Sum of adjusted event scores
    pub aggregate_score: f64,
    /// Mean of adjusted event confidences
    pub aggregate_confidence: f64,
    pub flagged: bool,
    /// Adjusted score total per round, for drill-down
    pub round_scores: BTreeMap<u32, f64>,
}

/// Roll all rounds' detector events into per-player results.
///
/// For each event type occurring at least `min_repeat_count` times for a
/// player, score and confidence are multiplied by
/// `1 + repeat_multiplier * (count - 1)`, confidence clamped to 1.
pub fn aggregate_griefing(
    events: Vec<GriefingEvent>,
    config: &AnalysisConfig,
) -> BTreeMap<u64, PlayerGriefingResult> {
    let mut by_player: BTreeMap<u64, Vec<GriefingEvent>> = BTreeMap::new();
    for event in events {
        by_player.entry(event.player_id).or_default().push(event);
    }

    let mut results = BTreeMap::new();
    for (player_id, mut events) in by_player {
        events.sort_by_key(|e| (e.round_number, e.event_type));

        let mut type_counts: FxHashMap<GriefingEventType, u32> = FxHashMap::default();
        for event in &events {
            *type_counts.entry(event.event_type).or_default() += 1;
        }

        for event in &mut events {
            let count = type_counts[&event.event_type];
            if count >= config.min_repeat_count {
                let multiplier = 1.0 + config.repeat_multiplier * (count - 1) as f64;
                event.score *= multiplier;
                event.confidence = (event.confidence * multiplier).min(1.0);
            }
        }

        let aggregate_score: f64 = events.iter().map(|e| e.score).sum();
        let aggregate_confidence = if events.is_empty() {
            0.0
        } else {
            events.iter().map(|e| e.confidence).sum::<f64>() / events.len() as f64
        };

        let mut round_scores: BTreeMap<u32, f64> = BTreeMap::new();
        for event in &events {
            *round_scores.entry(event.round_number).or_default() += event.score;
        }

        let player_name =
            events.first().map(|e| e.player_name.clone()).unwrap_or_default();

        results.insert(
            player_id,
            PlayerGriefingResult {
                player_id,
                player_name,
                flagged: aggregate_score >= config.flag_threshold,
                aggregate_score,
                aggregate_confidence,
                events,
                round_scores,
            },
        );
    }

    results
}
