use schema::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one damage exchange.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Attacker's total beat the defender's; the defender lost `damage` HP.
    DefenseBroken { damage: i64, defender_hp: i32 },
    /// Defender won by more than one point; the attacker lost `damage` HP.
    Reflected { damage: i64, attacker_hp: i32 },
    /// Defender won by at most one point, or tied.
    NoReflect,
}

impl fmt::Display for DamageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageOutcome::DefenseBroken { damage, defender_hp } => {
                write!(f, "造成 {} 点破防伤害 (防守方剩余 HP: {})", damage, defender_hp)
            }
            DamageOutcome::Reflected { damage, attacker_hp } => {
                write!(f, "未破防, 反伤 {} 点 (进攻方剩余 HP: {})", damage, attacker_hp)
            }
            DamageOutcome::NoReflect => write!(f, "未破防, 无反伤"),
        }
    }
}

/// Everything the engine writes to the battle log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    DiceRolled { side: Side, roll: i32 },
    /// All type matchup lines of one recomputation, newline separated.
    TypeMatchups { message: String },
    Damage(DamageOutcome),
    RoundAdvanced,
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::DiceRolled { side, roll } => write!(f, "{} 掷出 {} 点", side.label(), roll),
            BattleEvent::TypeMatchups { message } => write!(f, "{}", message),
            BattleEvent::Damage(outcome) => write!(f, "{}", outcome),
            BattleEvent::RoundAdvanced => write!(f, "--- 下一回合 ---"),
        }
    }
}
