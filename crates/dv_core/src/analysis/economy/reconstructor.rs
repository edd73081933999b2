//! # Round Economy Reconstructor
//!
//! Rebuilds per-player economic state for one round from two frame samples
//! and the deterministic starting-money model. The source data has no
//! per-purchase granularity, so everything here is best-effort inference:
//! observed money wins when the parser recorded it, model values fill the
//! gaps, and all derived amounts are clamped into their legal domains.

use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::economy::prices::{
    is_awp, normalize_weapon_id, snapshot_equipment_value, weapon_price,
};
use crate::analysis::timeline::{RoundWindow, TimelineView};
use crate::models::{Frame, GameEvent, Round, Team};

/// Seconds of tolerance when sampling the freeze-end frame.
const FREEZE_SAMPLE_WINDOW_SECS: f64 = 2.0;
/// The after-buy sample is the first frame between these two offsets past
/// freeze end (bounded by round end).
const AFTER_BUY_MIN_OFFSET_SECS: f64 = 5.0;
const AFTER_BUY_MAX_OFFSET_SECS: f64 = 15.0;

/// Reconstructed economic state of one player for one round.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct RoundEconomy {
    pub player_id: u64,
    pub name: String,
    pub team: Team,
    pub round_number: u32,
    /// Money at freeze end (observed when available, modeled otherwise)
    pub starting_money: i32,
    /// Money after the buy window
    pub money_after_buy: i32,
    /// Whether either money figure came from an actual observation
    pub money_observed: bool,
    /// Equipment value at the freeze-end sample
    pub equip_value: i32,
    /// Equipment value at the after-buy sample
    pub equip_value_after_buy: i32,
    /// max(money delta, equipment delta), never negative
    pub spent: i32,
    /// Value of the primary weapon retained from the previous round
    pub carried_over_value: i32,
    /// Normalized primary weapon id, preferring the after-buy sample
    pub primary_weapon: Option<String>,
    pub has_helmet: bool,
    pub has_defuser: bool,
    pub grenade_count: u32,
    pub damage_dealt: u32,
    pub kills: u32,
    /// Seconds from freeze end to this player's death, if they died
    pub time_to_death_secs: Option<f64>,
    pub time_alive_secs: f64,
    pub died_early: bool,
    pub low_impact: bool,
}

impl RoundEconomy {
    /// Equipment value usable for comparisons: the larger of the two
    /// samples, since players can both gain (late buy, pickup) and lose
    /// (drop, death) equipment between them.
    pub fn effective_equip_value(&self) -> i32 {
        self.equip_value.max(self.equip_value_after_buy)
    }

    /// Whether the loadout is a legitimate save carried from last round.
    /// AWPs have their own threshold: a saved AWP is always worth keeping
    /// and must never read as a refusal to buy.
    pub fn has_saved_weapon(&self, config: &AnalysisConfig) -> bool {
        if self.carried_over_value <= 0 {
            return false;
        }
        match &self.primary_weapon {
            Some(primary) if is_awp(primary) => self.carried_over_value >= config.awp_save_value,
            _ => self.carried_over_value >= config.rifle_save_value,
        }
    }
}

/// Reconstruct the economy map for one round.
///
/// `previous` is the prior round's output, threaded explicitly by the
/// caller; it feeds the leftover-money estimate and carried-over weapon
/// detection. Players without a freeze-end snapshot (late joiners,
/// disconnects) are absent from the result — never zero-defaulted, so no
/// detector can fire on fabricated state.
pub fn reconstruct_round_economy(
    view: &TimelineView,
    round: &Round,
    window: &RoundWindow,
    previous: Option<&FxHashMap<u64, RoundEconomy>>,
    config: &AnalysisConfig,
) -> FxHashMap<u64, RoundEconomy> {
    let mut economies = FxHashMap::default();

    let freeze_frame = match view
        .first_frame_at_or_after(window.freeze_end_tick, view.ticks(FREEZE_SAMPLE_WINDOW_SECS))
    {
        Some(frame) => frame,
        None => {
            log::debug!("round {}: no freeze-end frame, economy unavailable", round.number);
            return economies;
        }
    };

    let after_buy_frame = sample_after_buy(view, window);
    if after_buy_frame.is_none() {
        log::debug!("round {}: no after-buy frame, using freeze-end state only", round.number);
    }

    let stats = collect_round_stats(view, window);

    for snap in &freeze_frame.players {
        if !snap.connected || !snap.team.is_playing() {
            continue;
        }

        let after_snap = after_buy_frame.and_then(|f| f.snapshot_of(snap.player_id));
        let equip_value = snapshot_equipment_value(snap);
        let equip_value_after_buy = after_snap.map_or(equip_value, snapshot_equipment_value);

        let freeze_primary = snap.loadout.primary.as_deref().map(normalize_weapon_id);
        let primary_weapon = after_snap
            .and_then(|s| s.loadout.primary.as_deref().map(normalize_weapon_id))
            .or_else(|| freeze_primary.clone());

        let carried_over_value =
            carried_over_value(previous, snap.player_id, freeze_primary.as_deref());

        let observed_start = snap.observed_money();
        let starting_money = observed_start.unwrap_or_else(|| {
            modeled_starting_money(view, round, snap.team, snap.player_id, previous, config)
        });

        let equip_delta_estimate =
            (equip_value.max(equip_value_after_buy) - carried_over_value).max(0);

        let observed_after = after_snap.and_then(|s| s.observed_money());
        let money_after_buy =
            observed_after.unwrap_or_else(|| (starting_money - equip_delta_estimate).max(0));

        let money_delta_estimate = (starting_money - money_after_buy).max(0);
        let spent = money_delta_estimate.max(equip_delta_estimate);

        let player_stats = stats.get(&snap.name);
        let damage_dealt = player_stats.map_or(0, |s| s.damage);
        let kills = player_stats.map_or(0, |s| s.kills);
        let time_to_death_secs = player_stats.and_then(|s| s.death_tick).map(|tick| {
            view.secs_between(window.freeze_end_tick, tick)
        });
        let time_alive_secs = time_to_death_secs
            .unwrap_or_else(|| view.secs_between(window.freeze_end_tick, window.end_tick));

        let died_early = time_to_death_secs.is_some_and(|t| t < config.early_death_secs);
        let low_impact = damage_dealt < config.low_damage;

        let loadout_snap = after_snap.unwrap_or(snap);
        economies.insert(
            snap.player_id,
            RoundEconomy {
                player_id: snap.player_id,
                name: snap.name.clone(),
                team: snap.team,
                round_number: round.number,
                starting_money,
                money_after_buy,
                money_observed: observed_start.is_some() || observed_after.is_some(),
                equip_value,
                equip_value_after_buy,
                spent,
                carried_over_value,
                primary_weapon,
                has_helmet: loadout_snap.loadout.has_helmet,
                has_defuser: loadout_snap.loadout.has_defuser,
                grenade_count: loadout_snap.loadout.grenades.len() as u32,
                damage_dealt,
                kills,
                time_to_death_secs,
                time_alive_secs,
                died_early,
                low_impact,
            },
        );
    }

    economies
}

fn sample_after_buy<'a>(view: &TimelineView<'a>, window: &RoundWindow) -> Option<&'a Frame> {
    let target = window.freeze_end_tick.saturating_add(view.ticks(AFTER_BUY_MIN_OFFSET_SECS));
    let upper = window
        .freeze_end_tick
        .saturating_add(view.ticks(AFTER_BUY_MAX_OFFSET_SECS))
        .min(window.end_tick);
    if upper < target {
        return None;
    }
    view.frames_between(target, upper).first()
}

#[derive(Default)]
struct PlayerRoundStats {
    kills: u32,
    damage: u32,
    death_tick: Option<u32>,
}

/// Sum kill/damage events across the round, keyed by player name as the
/// events carry it; the caller resolves names against the round roster.
fn collect_round_stats(
    view: &TimelineView,
    window: &RoundWindow,
) -> FxHashMap<String, PlayerRoundStats> {
    let mut stats: FxHashMap<String, PlayerRoundStats> = FxHashMap::default();
    for event in view.events_between(window.start_tick, window.end_tick) {
        match event {
            GameEvent::Kill(kill) => {
                if let Some(attacker) = &kill.attacker {
                    if attacker != &kill.victim {
                        stats.entry(attacker.clone()).or_default().kills += 1;
                    }
                }
                let victim = stats.entry(kill.victim.clone()).or_default();
                if victim.death_tick.is_none() {
                    victim.death_tick = Some(kill.tick);
                }
            }
            GameEvent::Damage(damage) => {
                if let Some(attacker) = &damage.attacker {
                    if attacker != &damage.victim {
                        stats.entry(attacker.clone()).or_default().damage += damage.amount;
                    }
                }
            }
            _ => {}
        }
    }
    stats
}

fn carried_over_value(
    previous: Option<&FxHashMap<u64, RoundEconomy>>,
    player_id: u64,
    freeze_primary: Option<&str>,
) -> i32 {
    let (Some(prev_map), Some(current)) = (previous, freeze_primary) else {
        return 0;
    };
    match prev_map.get(&player_id).and_then(|p| p.primary_weapon.as_deref()) {
        Some(prev_primary) if prev_primary == current => weapon_price(current),
        _ => 0,
    }
}

/// Deterministic starting-money model for players whose money the parser
/// did not record.
///
/// Round 1 is the fixed pistol-round amount. Later rounds combine the
/// team's win/loss bonus with a leftover estimate: 30% of the previous
/// round's money survives a win, 50% survives a loss, and a flat
/// conservative constant stands in when the previous round is unknown.
fn modeled_starting_money(
    view: &TimelineView,
    round: &Round,
    team: Team,
    player_id: u64,
    previous: Option<&FxHashMap<u64, RoundEconomy>>,
    config: &AnalysisConfig,
) -> i32 {
    if round.number <= 1 {
        return config.pistol_round_money;
    }

    let won_previous = previous_round_result(view, round.number, team);
    let leftover_fraction = match won_previous {
        Some(true) => config.win_leftover_fraction,
        _ => config.loss_leftover_fraction,
    };
    let leftover = previous
        .and_then(|m| m.get(&player_id))
        .map(|p| (p.money_after_buy as f64 * leftover_fraction).round() as i32)
        .unwrap_or(config.fallback_leftover);

    let bonus = match won_previous {
        Some(true) => config.win_bonus,
        _ => {
            let streak = loss_streak(view, round.number, team);
            (config.loss_bonus_base + config.loss_bonus_step * (streak.saturating_sub(1)) as i32)
                .min(config.loss_bonus_cap)
        }
    };

    (leftover + bonus).min(config.max_money)
}

fn previous_round_result(view: &TimelineView, round_number: u32, team: Team) -> Option<bool> {
    round_by_number(view, round_number.checked_sub(1)?)?.won_by(team)
}

/// Consecutive rounds lost by `team` immediately before `round_number`,
/// walking backward until a win, an unknown winner, or round 1.
fn loss_streak(view: &TimelineView, round_number: u32, team: Team) -> u32 {
    let mut streak = 0;
    let mut number = round_number.saturating_sub(1);
    while number >= 1 {
        match round_by_number(view, number).and_then(|r| r.won_by(team)) {
            Some(false) => streak += 1,
            _ => break,
        }
        number -= 1;
    }
    streak.max(1)
}

fn round_by_number<'a>(view: &TimelineView<'a>, number: u32) -> Option<&'a Round> {
    view.rounds().iter().find(|r| r.number == number)
}
