use crate::roster::RosterEntry;
use crate::type_chart::{TypeBonus, TypeChart};
use arrayvec::ArrayVec;
use schema::{DiceMode, Side, TypeName};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::events::BattleEvent;

/// A combatant holds at most this many types.
pub const MAX_TYPES: usize = 2;
pub const DEFAULT_BASE_STAT: i32 = 10;
pub const DEFAULT_HP: i32 = 50;

pub type CombatantTypes = ArrayVec<TypeName, MAX_TYPES>;

/// One side of an encounter.
///
/// `base_stat`, `dice_roll` and `extra_bonus` are per-round inputs; `hp` is
/// the only value that carries across rounds and never drops below zero.
/// Serialize-only: values are built through `Default` and the setters.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    /// Roster name when the combatant was filled from a saved Pokemon.
    pub name: Option<String>,
    pub base_stat: i32,
    pub dice_roll: i32,
    pub types: CombatantTypes,
    pub extra_bonus: i32,
    hp: i32,
    pub is_special_attacker: bool,
}

impl Default for Combatant {
    fn default() -> Self {
        Self {
            name: None,
            base_stat: DEFAULT_BASE_STAT,
            dice_roll: 0,
            types: CombatantTypes::new(),
            extra_bonus: 0,
            hp: DEFAULT_HP,
            is_special_attacker: false,
        }
    }
}

impl Combatant {
    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Sets HP, clamping negative values to zero.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.max(0);
    }

    /// Subtracts `amount` from HP, never going below zero. Returns the new HP.
    pub fn take_damage(&mut self, amount: i64) -> i32 {
        let remaining = (i64::from(self.hp) - amount).max(0);
        self.hp = remaining.min(i64::from(i32::MAX)) as i32;
        self.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Base stat + dice + type bonus + extra bonus.
    pub fn total(&self, type_bonus: i32) -> i64 {
        i64::from(self.base_stat)
            + i64::from(self.dice_roll)
            + i64::from(type_bonus)
            + i64::from(self.extra_bonus)
    }

    /// Keeps the first two of `types`.
    pub fn set_types(&mut self, types: impl IntoIterator<Item = TypeName>) {
        self.types = types.into_iter().take(MAX_TYPES).collect();
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = if self.types.is_empty() {
            "-".to_string()
        } else {
            self.types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join("/")
        };
        let mode = if self.is_special_attacker { "特殊" } else { "物理" };

        if f.alternate() {
            writeln!(f, "{} [{}]", self.display_name(), types)?;
            writeln!(f, "  HP     : {}", self.hp)?;
            writeln!(f, "  基础值 : {} ({})", self.base_stat, mode)?;
            writeln!(f, "  骰点   : {}", self.dice_roll)?;
            write!(f, "  额外   : {}", self.extra_bonus)
        } else {
            write!(
                f,
                "{} [{}] HP {} | 基础 {} 骰 {} 额外 {}",
                self.display_name(),
                types,
                self.hp,
                self.base_stat,
                self.dice_roll,
                self.extra_bonus
            )
        }
    }
}

/// Battle log, most recent entry first.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleLog {
    entries: VecDeque<String>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
    }

    pub fn record(&mut self, event: &BattleEvent) {
        self.push(event.to_string());
    }

    /// Entries from newest to oldest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No dice rolled yet this round.
    Idle,
    /// At least one side rolled.
    Rolled,
    /// Damage has been resolved this round.
    Resolved,
}

/// What to do with type names the chart does not define.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeValidation {
    /// Accept them and let aggregation skip them.
    #[default]
    Permissive,
    /// Reject them, along with more than two types.
    Strict,
}

/// State of one quick-battle encounter.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub attacker: Combatant,
    pub defender: Combatant,
    pub type_bonus: TypeBonus,
    pub dice_mode: DiceMode,
    pub log: BattleLog,
    pub(crate) phase: RoundPhase,
    pub(crate) rolled: [bool; 2],
    pub(crate) chart: TypeChart,
    pub(crate) validation: TypeValidation,
    /// Roster consulted when the attack mode re-derives the base stat.
    pub(crate) stat_reference: Vec<RosterEntry>,
}

impl Encounter {
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn has_rolled(&self, side: Side) -> bool {
        self.rolled[side_index(side)]
    }

    pub fn chart(&self) -> &TypeChart {
        &self.chart
    }

    pub fn validation(&self) -> TypeValidation {
        self.validation
    }

    /// Current totals as (attacker, defender).
    pub fn totals(&self) -> (i64, i64) {
        (
            self.attacker.total(self.type_bonus.attacker),
            self.defender.total(self.type_bonus.defender),
        )
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (attacker_total, defender_total) = self.totals();
        writeln!(f, "=== 快速战斗 ({}) ===", self.dice_mode)?;
        writeln!(
            f,
            "{}: {} | 属性加成 {} | 合计 {}",
            Side::Attacker,
            self.attacker,
            self.type_bonus.attacker,
            attacker_total
        )?;
        write!(
            f,
            "{}: {} | 属性加成 {} | 合计 {}",
            Side::Defender,
            self.defender,
            self.type_bonus.defender,
            defender_total
        )
    }
}

pub(crate) fn side_index(side: Side) -> usize {
    match side {
        Side::Attacker => 0,
        Side::Defender => 1,
    }
}
