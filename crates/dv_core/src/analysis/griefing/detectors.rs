//! # Griefing Detector Bank
//!
//! Six pure, order-independent scoring functions, each consuming one
//! player's and one team's round economy. A detector returns at most one
//! event per player per round; detectors are not mutually exclusive, so a
//! wasteful force buy can legitimately trip several at once. Every emitted
//! event carries the numbers it was scored from, both as structured
//! features and as a readable sentence.

use std::collections::BTreeMap;

use serde_json::json;

use crate::analysis::config::AnalysisConfig;
use crate::analysis::economy::{RoundEconomy, TeamBuyState, TeamRoundEconomy, ARMOR_PRICE};
use crate::analysis::griefing::{saturating_confidence, GriefingEvent, GriefingEventType};
use crate::models::Team;

/// Run every detector for one player. Order is fixed but carries no
/// meaning; the aggregator treats the result as a set.
pub fn run_detectors(
    player: &RoundEconomy,
    team: &TeamRoundEconomy,
    config: &AnalysisConfig,
) -> Vec<GriefingEvent> {
    [
        detect_refuse_to_buy(player, team, config),
        detect_perma_force_buy(player, team, config),
        detect_troll_buys(player, team, config),
        detect_weapon_donation(player, team, config),
        detect_hoard_money(player, team, config),
        detect_buy_then_suicide(player, team, config),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn event(
    event_type: GriefingEventType,
    player: &RoundEconomy,
    score: f64,
    confidence: f64,
    features: BTreeMap<String, serde_json::Value>,
    human_reason: String,
) -> GriefingEvent {
    GriefingEvent {
        event_type,
        round_number: player.round_number,
        player_id: player.player_id,
        player_name: player.name.clone(),
        score,
        confidence,
        features,
        human_reason,
    }
}

/// Player could afford a buy, sits far below the team's equipment median,
/// carries no save, and visibly spent next to nothing. When weapon
/// identifiers are untracked the spend signal is unreliable and is not
/// used as a counter-signal.
pub fn detect_refuse_to_buy(
    player: &RoundEconomy,
    team: &TeamRoundEconomy,
    config: &AnalysisConfig,
) -> Option<GriefingEvent> {
    if player.starting_money < config.min_money_to_buy {
        return None;
    }
    let median = team.median_equip_value;
    if median <= 0.0 {
        return None;
    }
    let equip = player.effective_equip_value();
    if (equip as f64) >= median * config.refuse_equip_fraction {
        return None;
    }
    if player.has_saved_weapon(config) {
        return None;
    }
    if player.spent > config.low_spend && !team.weapons_untracked {
        return None;
    }

    let money_factor = player.starting_money as f64 / config.rifle_price as f64;
    let below_median_factor = ((median - equip as f64) / median).clamp(0.0, 1.0);
    let score = config.weights.refuse_to_buy * money_factor * below_median_factor;

    let mut features = BTreeMap::new();
    features.insert("startingMoney".to_string(), json!(player.starting_money));
    features.insert("equipValue".to_string(), json!(equip));
    features.insert("teamMedianEquipValue".to_string(), json!(median));
    features.insert("spent".to_string(), json!(player.spent));
    features.insert("teamBuyState".to_string(), json!(team.buy_state.label()));
    features.insert("weaponsUntracked".to_string(), json!(team.weapons_untracked));

    Some(event(
        GriefingEventType::RefuseToBuyWithMoney,
        player,
        score,
        saturating_confidence(score, 0.6),
        features,
        format!(
            "{} held ${} but fielded ${} of equipment against a team median of ${:.0} \
             ({} round) while spending ${}",
            player.name, player.starting_money, equip, median, team.buy_state.label(),
            player.spent
        ),
    ))
}

/// Force-buy spending into a team eco, followed by an early or
/// low-impact death.
pub fn detect_perma_force_buy(
    player: &RoundEconomy,
    team: &TeamRoundEconomy,
    config: &AnalysisConfig,
) -> Option<GriefingEvent> {
    if team.buy_state != TeamBuyState::Eco {
        return None;
    }
    if player.spent < config.force_buy_spend {
        return None;
    }
    if !(player.died_early || player.low_impact) {
        return None;
    }

    let score = config.weights.perma_force_buy * (player.spent as f64 / config.rifle_price as f64);

    let mut features = BTreeMap::new();
    features.insert("spent".to_string(), json!(player.spent));
    features.insert("teamBuyState".to_string(), json!(team.buy_state.label()));
    features.insert("diedEarly".to_string(), json!(player.died_early));
    features.insert("damageDealt".to_string(), json!(player.damage_dealt));

    Some(event(
        GriefingEventType::PermaForceBuyAgainstTeamEconomy,
        player,
        score,
        saturating_confidence(score, 0.5),
        features,
        format!(
            "{} spent ${} into a team eco and contributed {} damage{}",
            player.name,
            player.spent,
            player.damage_dealt,
            if player.died_early { ", dying early" } else { "" }
        ),
    ))
}

/// Internally inconsistent loadout: rifle with no head armor, a CT
/// full-buy without a defuse kit despite the money for one, or a grenade
/// stack with no primary at all.
pub fn detect_troll_buys(
    player: &RoundEconomy,
    team: &TeamRoundEconomy,
    config: &AnalysisConfig,
) -> Option<GriefingEvent> {
    let mut patterns: Vec<&str> = Vec::new();

    // Helmet is the only armor signal the snapshot exposes
    let primary_price = player
        .primary_weapon
        .as_deref()
        .map(crate::analysis::economy::weapon_price)
        .unwrap_or(0);
    if primary_price >= config.force_buy_equip_value && !player.has_helmet {
        patterns.push("primary weapon with no head armor");
    }

    if player.team == Team::Ct
        && team.buy_state == TeamBuyState::FullBuy
        && !player.has_defuser
        && player.money_after_buy >= crate::analysis::economy::DEFUSER_PRICE
    {
        patterns.push("no defuse kit on a full-buy round");
    }

    if player.grenade_count >= 3 && player.primary_weapon.is_none() {
        patterns.push("grenade stack without a primary weapon");
    }

    if patterns.is_empty() {
        return None;
    }

    let score = config.weights.troll_buys * patterns.len() as f64;

    let mut features = BTreeMap::new();
    features.insert("patterns".to_string(), json!(patterns));
    features.insert("primaryWeapon".to_string(), json!(player.primary_weapon));
    features.insert("hasHelmet".to_string(), json!(player.has_helmet));
    features.insert("hasDefuser".to_string(), json!(player.has_defuser));
    features.insert("grenadeCount".to_string(), json!(player.grenade_count));
    features.insert("moneyAfterBuy".to_string(), json!(player.money_after_buy));

    Some(event(
        GriefingEventType::TrollBuys,
        player,
        score,
        saturating_confidence(score, 0.5),
        features,
        format!("{} bought an inconsistent loadout: {}", player.name, patterns.join("; ")),
    ))
}

/// Expensive loadout handed to the enemy through an early death with
/// negligible resistance.
pub fn detect_weapon_donation(
    player: &RoundEconomy,
    _team: &TeamRoundEconomy,
    config: &AnalysisConfig,
) -> Option<GriefingEvent> {
    let equip = player.effective_equip_value();
    if equip < config.donation_equip_value {
        return None;
    }
    let ttd = player.time_to_death_secs?;
    if ttd >= config.early_death_secs {
        return None;
    }
    if player.damage_dealt > config.low_damage {
        return None;
    }

    let equip_factor = equip as f64 / config.rifle_price as f64;
    let earliness = (1.0 - ttd / config.early_death_secs).clamp(0.0, 1.0);
    let score = config.weights.weapon_donation * equip_factor * earliness;

    let mut features = BTreeMap::new();
    features.insert("equipValue".to_string(), json!(equip));
    features.insert("timeToDeathSecs".to_string(), json!(ttd));
    features.insert("damageDealt".to_string(), json!(player.damage_dealt));

    Some(event(
        GriefingEventType::WeaponDonationToEnemy,
        player,
        score,
        saturating_confidence(score, 0.6),
        features,
        format!(
            "{} carried ${} of equipment and died after {:.1}s with {} damage dealt",
            player.name, equip, ttd, player.damage_dealt
        ),
    ))
}

/// High leftover money while the team was buying, with no save and no
/// visible spending. When weapon identifiers are untracked, equipment
/// value is unreliably low, so the money floor is raised and only spend
/// within the armor heuristic qualifies.
pub fn detect_hoard_money(
    player: &RoundEconomy,
    team: &TeamRoundEconomy,
    config: &AnalysisConfig,
) -> Option<GriefingEvent> {
    if team.buy_state == TeamBuyState::Eco {
        return None;
    }
    // Untracked guard: raised floor, and only spend at or below the armor
    // heuristic (which reads as phantom spend for everyone alive) qualifies
    let (floor, spend_cap) = if team.weapons_untracked {
        (config.hoard_money_floor_untracked, ARMOR_PRICE)
    } else {
        (config.hoard_money_floor, config.low_spend)
    };
    if player.money_after_buy < floor {
        return None;
    }
    if player.has_saved_weapon(config) {
        return None;
    }
    if player.effective_equip_value() >= config.force_buy_equip_value {
        return None;
    }
    if player.spent > spend_cap {
        return None;
    }

    let score =
        config.weights.hoard_money * (player.money_after_buy as f64 / config.full_buy_money as f64);

    let mut features = BTreeMap::new();
    features.insert("moneyAfterBuy".to_string(), json!(player.money_after_buy));
    features.insert("equipValue".to_string(), json!(player.effective_equip_value()));
    features.insert("spent".to_string(), json!(player.spent));
    features.insert("teamBuyState".to_string(), json!(team.buy_state.label()));
    features.insert("weaponsUntracked".to_string(), json!(team.weapons_untracked));

    Some(event(
        GriefingEventType::HoardMoneyWhileTeamNeedsBuy,
        player,
        score,
        saturating_confidence(score, 0.6),
        features,
        format!(
            "{} kept ${} after the buy while the team ran a {} round, spending ${}",
            player.name, player.money_after_buy, team.buy_state.label(), player.spent
        ),
    ))
}

/// Force-buy-level spending thrown away within seconds: economically
/// wasteful positioning regardless of the team's own buy.
pub fn detect_buy_then_suicide(
    player: &RoundEconomy,
    _team: &TeamRoundEconomy,
    config: &AnalysisConfig,
) -> Option<GriefingEvent> {
    if player.spent < config.force_buy_spend {
        return None;
    }
    let ttd = player.time_to_death_secs?;
    if ttd >= config.early_death_secs {
        return None;
    }
    if player.damage_dealt > config.low_damage {
        return None;
    }

    let spend_factor = player.spent as f64 / config.rifle_price as f64;
    let earliness = (1.0 - ttd / config.early_death_secs).clamp(0.0, 1.0);
    let score = config.weights.buy_then_suicide * spend_factor * earliness;

    let mut features = BTreeMap::new();
    features.insert("spent".to_string(), json!(player.spent));
    features.insert("timeToDeathSecs".to_string(), json!(ttd));
    features.insert("damageDealt".to_string(), json!(player.damage_dealt));

    Some(event(
        GriefingEventType::BuyThenSuicidePeek,
        player,
        score,
        saturating_confidence(score, 0.5),
        features,
        format!(
            "{} spent ${} and died after {:.1}s with {} damage dealt",
            player.name, player.spent, ttd, player.damage_dealt
        ),
    ))
}
