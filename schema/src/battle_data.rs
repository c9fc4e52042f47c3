use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    /// The label used in battle log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Attacker => "攻击方",
            Side::Defender => "防守方",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where a round's dice value comes from.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DiceMode {
    #[default]
    Manual,
    D6,
    D4,
}

impl DiceMode {
    /// Number of faces of the die, or `None` when rolls are entered by hand.
    pub fn faces(&self) -> Option<u8> {
        match self {
            DiceMode::Manual => None,
            DiceMode::D6 => Some(6),
            DiceMode::D4 => Some(4),
        }
    }
}

/// Which offensive stat feeds the attacker's base stat.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttackMode {
    #[default]
    Physical,
    Special,
}

impl AttackMode {
    pub fn is_special(&self) -> bool {
        matches!(self, AttackMode::Special)
    }
}

/// Kinds of campaign timeline events.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EventKind {
    Pokemon,
    Item,
    Badge,
    Battle,
    Story,
    Special,
    Other,
}
