//! Property-based test generators for timeline types
//!
//! Proptest strategies for the replay input shapes, used by the economy
//! reconstruction property tests.

use proptest::prelude::*;

use super::timeline::{Frame, Loadout, PlayerSnapshot, Team, WorldPos};

pub fn world_pos_strategy() -> impl Strategy<Value = WorldPos> {
    (-8192.0f64..=8192.0, -8192.0f64..=8192.0, -512.0f64..=512.0)
        .prop_map(|(x, y, z)| WorldPos { x, y, z })
}

pub fn team_strategy() -> impl Strategy<Value = Team> {
    prop_oneof![Just(Team::Ct), Just(Team::T)]
}

pub fn weapon_id_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("weapon_ak47".to_string())),
        Just(Some("weapon_m4a1".to_string())),
        Just(Some("weapon_awp".to_string())),
        Just(Some("weapon_mac10".to_string())),
        // Unknown identifier; must price at zero, never fail
        Just(Some("weapon_modded_blaster".to_string())),
    ]
}

pub fn loadout_strategy() -> impl Strategy<Value = Loadout> {
    (
        weapon_id_strategy(),
        proptest::collection::vec(
            prop_oneof![
                Just("weapon_hegrenade".to_string()),
                Just("weapon_flashbang".to_string()),
                Just("weapon_smokegrenade".to_string()),
            ],
            0..4,
        ),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(primary, grenades, has_helmet, has_defuser)| Loadout {
            primary,
            secondary: None,
            grenades,
            has_helmet,
            has_defuser,
            has_bomb: false,
        })
}

pub fn player_snapshot_strategy(player_id: u64) -> impl Strategy<Value = PlayerSnapshot> {
    (
        team_strategy(),
        0u32..=100,
        world_pos_strategy(),
        loadout_strategy(),
        prop_oneof![Just(None), (0i32..=16000).prop_map(Some), Just(Some(-1))],
    )
        .prop_map(move |(team, hp, pos, loadout, money)| PlayerSnapshot {
            player_id,
            name: format!("player_{}", player_id),
            team,
            hp,
            alive: hp > 0,
            connected: true,
            pos,
            loadout,
            money,
        })
}

/// A frame at a fixed tick with snapshots for player ids `0..players`.
pub fn frame_strategy(tick: u32, players: u64) -> impl Strategy<Value = Frame> {
    // A Vec of strategies is itself a strategy producing a Vec of values
    (0..players)
        .map(player_snapshot_strategy)
        .collect::<Vec<_>>()
        .prop_map(move |players| Frame {
            tick,
            time: tick as f64 / 64.0,
            players,
            events: Vec::new(),
        })
}
