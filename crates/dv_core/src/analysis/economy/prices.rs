//! # Equipment Price Table
//!
//! Dollar values for the visible loadout, keyed by normalized weapon
//! identifier. Unknown identifiers price at zero: the resulting equipment
//! value is a lower bound, and every consumer downstream is written to
//! tolerate systematically low values.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;

use crate::models::{PlayerSnapshot, Team};

pub const ARMOR_PRICE: i32 = 650;
pub const HELMET_PRICE: i32 = 350;
pub const DEFUSER_PRICE: i32 = 400;

static WEAPON_PRICES: Lazy<FxHashMap<&'static str, i32>> = Lazy::new(|| {
    let mut prices = FxHashMap::default();
    // Rifles
    prices.insert("ak47", 2700);
    prices.insert("m4a4", 3100);
    prices.insert("m4a1", 2900);
    prices.insert("m4a1_silencer", 2900);
    prices.insert("famas", 2050);
    prices.insert("galilar", 1800);
    prices.insert("galil", 1800);
    prices.insert("sg556", 3000);
    prices.insert("aug", 3300);
    prices.insert("awp", 4750);
    prices.insert("ssg08", 1700);
    prices.insert("scar20", 5000);
    prices.insert("g3sg1", 5000);
    // SMGs
    prices.insert("mac10", 1050);
    prices.insert("mp9", 1250);
    prices.insert("mp7", 1500);
    prices.insert("mp5sd", 1500);
    prices.insert("ump45", 1200);
    prices.insert("p90", 2350);
    prices.insert("bizon", 1400);
    // Heavy
    prices.insert("nova", 1050);
    prices.insert("xm1014", 2000);
    prices.insert("mag7", 1300);
    prices.insert("sawedoff", 1100);
    prices.insert("m249", 5200);
    prices.insert("negev", 1700);
    // Pistols
    prices.insert("deagle", 700);
    prices.insert("revolver", 600);
    prices.insert("elite", 300);
    prices.insert("fiveseven", 500);
    prices.insert("tec9", 500);
    prices.insert("cz75a", 500);
    prices.insert("p250", 300);
    // Default pistols carry no purchase value
    prices.insert("glock", 0);
    prices.insert("usp_silencer", 0);
    prices.insert("hkp2000", 0);
    // Grenades
    prices.insert("hegrenade", 300);
    prices.insert("flashbang", 200);
    prices.insert("smokegrenade", 300);
    prices.insert("molotov", 400);
    prices.insert("incgrenade", 500);
    prices.insert("decoy", 50);
    // Misc
    prices.insert("taser", 200);
    prices
});

/// Strip parser prefixes and case so ids from different demo sources key
/// the same table entry ("weapon_AK47" and "ak47" must agree).
pub fn normalize_weapon_id(raw: &str) -> String {
    let id = raw.trim().to_ascii_lowercase();
    let id = id.strip_prefix("weapon_").unwrap_or(&id);
    let id = id.strip_prefix("item_").unwrap_or(id);
    id.to_string()
}

/// Price of a weapon or grenade; unknown identifiers are worth zero.
pub fn weapon_price(id: &str) -> i32 {
    WEAPON_PRICES.get(normalize_weapon_id(id).as_str()).copied().unwrap_or(0)
}

pub fn is_awp(id: &str) -> bool {
    normalize_weapon_id(id) == "awp"
}

/// Reconstructed monetary worth of one snapshot's visible loadout.
///
/// Armor state is not observable in the source data, so any living player
/// is assumed to wear kevlar; the defuser only counts for the defending
/// side. The result is a lower bound whenever weapon identity is missing.
pub fn snapshot_equipment_value(snap: &PlayerSnapshot) -> i32 {
    let loadout = &snap.loadout;
    let mut value = 0;
    if let Some(primary) = &loadout.primary {
        value += weapon_price(primary);
    }
    if let Some(secondary) = &loadout.secondary {
        value += weapon_price(secondary);
    }
    for grenade in &loadout.grenades {
        value += weapon_price(grenade);
    }
    if snap.hp > 0 {
        value += ARMOR_PRICE;
    }
    if loadout.has_helmet {
        value += HELMET_PRICE;
    }
    if loadout.has_defuser && snap.team == Team::Ct {
        value += DEFUSER_PRICE;
    }
    value
}
