//! # Analysis Configuration
//!
//! Every heuristic threshold used by the engine, collected in one place
//! with documented defaults. Hosts inject overrides through the JSON API;
//! nothing in the engine reads a threshold from anywhere else.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-pattern score weights for the griefing detectors.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
#[serde(default)]
pub struct DetectorWeights {
    pub refuse_to_buy: f64,
    pub perma_force_buy: f64,
    pub troll_buys: f64,
    pub weapon_donation: f64,
    pub hoard_money: f64,
    pub buy_then_suicide: f64,
}

impl Default for DetectorWeights {
    fn default() -> Self {
        Self {
            refuse_to_buy: 0.4,
            perma_force_buy: 0.3,
            troll_buys: 0.25,
            weapon_donation: 0.35,
            hoard_money: 0.3,
            buy_then_suicide: 0.25,
        }
    }
}

/// Tunables for the behavioral analytics engine.
///
/// Dollar values follow the CS2 economy; time values are seconds and are
/// converted to ticks against the timeline's tick rate at the point of use.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    // --- AFK tracking ---
    /// Planar displacement (map units) below which a player counts as still
    pub movement_epsilon: f64,
    /// Minimum stillness duration before a detection is emitted
    pub afk_threshold_secs: f64,
    /// Window after freeze end; movement inside it exempts the whole round
    pub grace_period_secs: f64,

    // --- starting-money model ---
    pub pistol_round_money: i32,
    pub max_money: i32,
    pub win_bonus: i32,
    pub loss_bonus_base: i32,
    pub loss_bonus_step: i32,
    pub loss_bonus_cap: i32,
    /// Fraction of the previous round's money assumed kept after a win
    pub win_leftover_fraction: f64,
    /// Fraction assumed kept after a loss
    pub loss_leftover_fraction: f64,
    /// Leftover estimate when the previous round's money is unknown
    pub fallback_leftover: i32,

    // --- team buy-state classification ---
    pub full_buy_equip_value: i32,
    pub force_buy_equip_value: i32,
    /// Median equipment value below which weapon identity is considered
    /// untracked upstream and classification falls back to money
    pub untracked_median_equip: i32,
    pub full_buy_money: i32,
    pub force_buy_money: i32,

    // --- impact flags ---
    pub early_death_secs: f64,
    pub low_damage: u32,

    // --- detector thresholds ---
    /// Below this starting money a player is never expected to buy
    pub min_money_to_buy: i32,
    /// Spending at or under this counts as "did not buy". Sits above the
    /// armor heuristic (650), which shows up as phantom spend for players
    /// who bought nothing.
    pub low_spend: i32,
    /// Spending at or above this counts as a force buy
    pub force_buy_spend: i32,
    /// Equipment value below this fraction of the team median reads as
    /// markedly under-equipped
    pub refuse_equip_fraction: f64,
    pub hoard_money_floor: i32,
    /// Raised floor when weapon identifiers are untracked
    pub hoard_money_floor_untracked: i32,
    /// Equipment value from which an early low-impact death reads as a
    /// weapon donation
    pub donation_equip_value: i32,
    /// Reference rifle price used to scale money-relative scores
    pub rifle_price: i32,
    /// Carried-over value from which a loadout counts as a saved rifle
    pub rifle_save_value: i32,
    /// Carried-over value from which a saved AWP counts as a save
    pub awp_save_value: i32,
    pub weights: DetectorWeights,

    // --- aggregation ---
    /// Occurrences of one pattern before the repeat boost applies
    pub min_repeat_count: u32,
    pub repeat_multiplier: f64,
    pub flag_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            movement_epsilon: 3.0,
            afk_threshold_secs: 5.0,
            grace_period_secs: 5.0,

            pistol_round_money: 800,
            max_money: 16000,
            win_bonus: 3250,
            loss_bonus_base: 1400,
            loss_bonus_step: 500,
            loss_bonus_cap: 3400,
            win_leftover_fraction: 0.30,
            loss_leftover_fraction: 0.50,
            fallback_leftover: 1000,

            full_buy_equip_value: 3500,
            force_buy_equip_value: 1500,
            untracked_median_equip: 1000,
            full_buy_money: 4500,
            force_buy_money: 2000,

            early_death_secs: 18.0,
            low_damage: 25,

            min_money_to_buy: 2500,
            low_spend: 700,
            force_buy_spend: 1500,
            refuse_equip_fraction: 0.5,
            hoard_money_floor: 4000,
            hoard_money_floor_untracked: 6000,
            donation_equip_value: 3000,
            rifle_price: 2700,
            rifle_save_value: 1800,
            awp_save_value: 4000,
            weights: DetectorWeights::default(),

            min_repeat_count: 2,
            repeat_multiplier: 0.5,
            flag_threshold: 0.5,
        }
    }
}
