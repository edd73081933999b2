//! # Team Economy Classifier
//!
//! Rolls one round's player economies into a per-team buy state. The
//! equipment signal is a lower bound whenever the upstream parser omits
//! weapon identifiers, so classification is dual-path: equipment-value
//! thresholds when the median looks plausible, money thresholds when it
//! does not. A single equipment threshold would label every round "eco"
//! for weaponless data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use fxhash::FxHashMap;

use crate::analysis::config::AnalysisConfig;
use crate::analysis::economy::reconstructor::RoundEconomy;
use crate::models::Team;

/// Team-level classification of round investment.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TeamBuyState {
    FullBuy,
    Force,
    Eco,
}

impl TeamBuyState {
    /// Wire-format label, reused verbatim in detector feature snapshots.
    pub fn label(self) -> &'static str {
        match self {
            TeamBuyState::FullBuy => "fullBuy",
            TeamBuyState::Force => "force",
            TeamBuyState::Eco => "eco",
        }
    }
}

/// One team's aggregated economy for one round.
///
/// Recomputed fresh every round; nothing here is carried forward.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct TeamRoundEconomy {
    pub team: Team,
    pub round_number: u32,
    pub buy_state: TeamBuyState,
    pub avg_equip_value: f64,
    pub median_equip_value: f64,
    pub avg_money: f64,
    /// Median equipment was implausibly low, so weapon identity is
    /// considered untracked and money thresholds were used instead
    pub weapons_untracked: bool,
    /// Member economies, sorted by player id
    pub members: Vec<RoundEconomy>,
}

impl TeamRoundEconomy {
    pub fn member(&self, player_id: u64) -> Option<&RoundEconomy> {
        self.members.iter().find(|m| m.player_id == player_id)
    }
}

/// Classify one team's buy state for the round.
///
/// Returns `None` when the round reconstructed no members for the team
/// (e.g. everyone joined after freeze end) — the detector bank then skips
/// the team entirely rather than judging players against empty aggregates.
pub fn classify_team_economy(
    team: Team,
    round_number: u32,
    economies: &FxHashMap<u64, RoundEconomy>,
    config: &AnalysisConfig,
) -> Option<TeamRoundEconomy> {
    let mut members: Vec<RoundEconomy> =
        economies.values().filter(|e| e.team == team).cloned().collect();
    if members.is_empty() {
        return None;
    }
    members.sort_by_key(|m| m.player_id);

    let equip_values: Vec<i32> = members.iter().map(|m| m.effective_equip_value()).collect();
    let median_equip_value = median(&equip_values);
    let avg_equip_value =
        equip_values.iter().map(|&v| v as f64).sum::<f64>() / equip_values.len() as f64;
    let avg_money = members.iter().map(|m| m.starting_money as f64).sum::<f64>()
        / members.len() as f64;

    let weapons_untracked = (median_equip_value as i32) < config.untracked_median_equip;

    let buy_state = if weapons_untracked {
        classify_by_money(&members, config)
    } else {
        classify_by_equipment(median_equip_value, config)
    };

    Some(TeamRoundEconomy {
        team,
        round_number,
        buy_state,
        avg_equip_value,
        median_equip_value,
        avg_money,
        weapons_untracked,
        members,
    })
}

fn classify_by_equipment(median_equip: f64, config: &AnalysisConfig) -> TeamBuyState {
    if median_equip >= config.full_buy_equip_value as f64 {
        TeamBuyState::FullBuy
    } else if median_equip >= config.force_buy_equip_value as f64 {
        TeamBuyState::Force
    } else {
        TeamBuyState::Eco
    }
}

/// Money-fraction vote: at least half the team at full-buy money reads as
/// a full buy, else at least half at force-buy money reads as a force.
fn classify_by_money(members: &[RoundEconomy], config: &AnalysisConfig) -> TeamBuyState {
    let half = (members.len() + 1) / 2;
    let full = members.iter().filter(|m| m.starting_money >= config.full_buy_money).count();
    if full >= half {
        return TeamBuyState::FullBuy;
    }
    let force = members.iter().filter(|m| m.starting_money >= config.force_buy_money).count();
    if force >= half {
        TeamBuyState::Force
    } else {
        TeamBuyState::Eco
    }
}

/// Median of a non-empty slice (mean of the middle pair for even lengths).
fn median(values: &[i32]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn economy(player_id: u64, team: Team, equip: i32, money: i32) -> RoundEconomy {
        RoundEconomy {
            player_id,
            name: format!("p{}", player_id),
            team,
            round_number: 1,
            starting_money: money,
            money_after_buy: 0,
            money_observed: false,
            equip_value: equip,
            equip_value_after_buy: equip,
            spent: 0,
            carried_over_value: 0,
            primary_weapon: None,
            has_helmet: false,
            has_defuser: false,
            grenade_count: 0,
            damage_dealt: 0,
            kills: 0,
            time_to_death_secs: None,
            time_alive_secs: 0.0,
            died_early: false,
            low_impact: true,
        }
    }

    fn econ_map(entries: Vec<RoundEconomy>) -> FxHashMap<u64, RoundEconomy> {
        entries.into_iter().map(|e| (e.player_id, e)).collect()
    }

    #[test]
    fn test_full_buy_from_equipment() {
        let config = AnalysisConfig::default();
        let map = econ_map(
            (1..=5).map(|id| economy(id, Team::Ct, 4200, 1000)).collect(),
        );
        let team = classify_team_economy(Team::Ct, 1, &map, &config).unwrap();
        assert_eq!(team.buy_state, TeamBuyState::FullBuy);
        assert!(!team.weapons_untracked);
        assert_eq!(team.median_equip_value, 4200.0);
    }

    #[test]
    fn test_eco_from_equipment() {
        let config = AnalysisConfig::default();
        // Above the untracked threshold but below force-buy value
        let map = econ_map((1..=5).map(|id| economy(id, Team::T, 1100, 2000)).collect());
        let team = classify_team_economy(Team::T, 1, &map, &config).unwrap();
        assert_eq!(team.buy_state, TeamBuyState::Eco);
        assert!(!team.weapons_untracked);
    }

    #[test]
    fn test_untracked_median_falls_back_to_money() {
        let config = AnalysisConfig::default();
        // Median equipment is armor-only, but everyone is rich: the money
        // path must classify this as a full buy, not an eco
        let map = econ_map((1..=5).map(|id| economy(id, Team::T, 650, 5000)).collect());
        let team = classify_team_economy(Team::T, 1, &map, &config).unwrap();
        assert!(team.weapons_untracked);
        assert_eq!(team.buy_state, TeamBuyState::FullBuy);
    }

    #[test]
    fn test_untracked_poor_team_is_eco() {
        let config = AnalysisConfig::default();
        let map = econ_map((1..=5).map(|id| economy(id, Team::T, 650, 800)).collect());
        let team = classify_team_economy(Team::T, 1, &map, &config).unwrap();
        assert!(team.weapons_untracked);
        assert_eq!(team.buy_state, TeamBuyState::Eco);
    }

    #[test]
    fn test_money_vote_force() {
        let config = AnalysisConfig::default();
        let mut entries: Vec<RoundEconomy> =
            (1..=3).map(|id| economy(id, Team::Ct, 650, 2500)).collect();
        entries.push(economy(4, Team::Ct, 650, 500));
        entries.push(economy(5, Team::Ct, 650, 500));
        let team = classify_team_economy(Team::Ct, 1, &econ_map(entries), &config).unwrap();
        assert_eq!(team.buy_state, TeamBuyState::Force);
    }

    #[test]
    fn test_empty_team_yields_none() {
        let config = AnalysisConfig::default();
        let map = econ_map(vec![economy(1, Team::Ct, 4000, 4000)]);
        assert!(classify_team_economy(Team::T, 1, &map, &config).is_none());
    }

    #[test]
    fn test_members_sorted_and_other_team_excluded() {
        let config = AnalysisConfig::default();
        let map = econ_map(vec![
            economy(9, Team::Ct, 4000, 4000),
            economy(3, Team::Ct, 4000, 4000),
            economy(5, Team::T, 100, 100),
        ]);
        let team = classify_team_economy(Team::Ct, 1, &map, &config).unwrap();
        let ids: Vec<u64> = team.members.iter().map(|m| m.player_id).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn test_median_even_length() {
        assert_eq!(median(&[1, 3]), 2.0);
        assert_eq!(median(&[5]), 5.0);
        assert_eq!(median(&[1, 2, 3, 10]), 2.5);
    }

    #[test]
    fn test_buy_state_labels() {
        assert_eq!(TeamBuyState::FullBuy.label(), "fullBuy");
        assert_eq!(serde_json::to_string(&TeamBuyState::FullBuy).unwrap(), "\"fullBuy\"");
    }
}
