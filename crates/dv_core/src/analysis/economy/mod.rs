//! # Economy Reconstruction Module
//!
//! Per-round economic inference from incomplete observations.
//!
//! - `prices` - equipment price table and loadout valuation
//! - `reconstructor` - per-player `RoundEconomy` reconstruction
//! - `team` - per-team buy-state classification

pub mod prices;
pub mod reconstructor;
pub mod team;

pub use prices::{
    normalize_weapon_id, snapshot_equipment_value, weapon_price, ARMOR_PRICE, DEFUSER_PRICE,
    HELMET_PRICE,
};
pub use reconstructor::{reconstruct_round_economy, RoundEconomy};
pub use team::{classify_team_economy, TeamBuyState, TeamRoundEconomy};
