use crate::TypeName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub special_attack: i32,
    pub special_defense: i32,
    pub speed: i32,
}

/// A saved Pokemon in the player roster.
///
/// Serialized in camelCase so the JSON blob stays compatible with rosters
/// written by the mobile app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub types: Vec<TypeName>,
    pub stats: BaseStats,
}

impl RosterEntry {
    /// The offensive stat used to seed a combatant's base stat.
    pub fn offensive_stat(&self, special: bool) -> i32 {
        if special {
            self.stats.special_attack
        } else {
            self.stats.attack
        }
    }
}
