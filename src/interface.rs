//! Text command layer shared by the terminal REPL and the MCP server.
//!
//! A [`BattleSession`] owns one encounter plus the roster and dice it draws
//! from; every command returns the text to show the player.

use crate::battle::dice::{DiceSource, RandomDice};
use crate::battle::state::Encounter;
use crate::config::CompanionConfig;
use crate::errors::CompanionResult;
use crate::roster::{FileStore, PokemonStorage, RosterEntry, RosterProvider};
use crate::type_chart::TypeChart;
use schema::{AttackMode, DiceMode, Side, TypeName};
use std::fmt;
use tracing::info;

pub const HELP_TEXT: &str = "\
Commands:
  status                      show both combatants and totals
  log [n]                     show the last n log entries (default 10)
  types                       list the type chart
  roster                      list saved Pokemon
  select <a|d> <n>            fill a side from roster entry n
  stat|hp|dice|bonus <a|d> <value>
                              set base stat, HP, dice roll or extra bonus
  type <a|d> [t1] [t2]        set a side's types (none clears them)
  mode <manual|d6|d4>         choose how dice are rolled
  attack <physical|special>   choose the attacker's offensive stat
  roll <a|d>                  roll the die for a side
  resolve                     compute damage for this round
  reset                       clear dice and bonuses, keep HP
  next                        reset and start the next round
  swap                        exchange attacker and defender
  clear                       clear the battle log
  help                        show this text";

const DEFAULT_LOG_LINES: usize = 10;

/// Fields accepted by [`BattleSession::set_value`].
pub const VALUE_FIELDS: [&str; 4] = ["stat", "hp", "dice", "bonus"];

/// Parses `a`/`attacker`/`攻` and `d`/`defender`/`防` style side names.
pub fn parse_side(text: &str) -> Option<Side> {
    match text.trim().to_lowercase().as_str() {
        "a" | "atk" | "attacker" | "攻" | "攻击方" => Some(Side::Attacker),
        "d" | "def" | "defender" | "防" | "防守方" => Some(Side::Defender),
        _ => None,
    }
}

/// Lists the chart's types in table order.
pub fn display_type_chart(chart: &TypeChart) -> String {
    let names: Vec<&str> = chart.type_names().iter().map(TypeName::as_str).collect();
    format!("Types ({}): {}", names.len(), names.join(" "))
}

/// Numbered roster listing, numbered from 1.
pub fn display_roster(roster: &[RosterEntry]) -> String {
    if roster.is_empty() {
        return "The roster is empty.".to_string();
    }

    let mut output = String::from("Saved Pokemon:\n");
    for (i, entry) in roster.iter().enumerate() {
        let types: Vec<&str> = entry.types.iter().map(TypeName::as_str).collect();
        let owner = entry
            .owner
            .as_deref()
            .map(|o| format!(" ({})", o))
            .unwrap_or_default();
        output.push_str(&format!(
            "  {}. {}{} [{}] HP:{} ATK:{} SP.ATK:{}\n",
            i + 1,
            entry.name,
            owner,
            types.join("/"),
            entry.stats.hp,
            entry.stats.attack,
            entry.stats.special_attack
        ));
    }
    output
}

/// The newest `limit` log entries, newest first.
pub fn display_log(encounter: &Encounter, limit: usize) -> String {
    if encounter.log.is_empty() {
        return "The battle log is empty.".to_string();
    }
    let mut output = String::from("--- 战斗记录 ---\n");
    for entry in encounter.log.entries().take(limit) {
        output.push_str(entry);
        output.push('\n');
    }
    output
}

/// One encounter plus the roster and dice it draws from.
///
/// The roster is read through its provider on every listing or selection, so
/// entries saved by another process show up without a restart.
pub struct BattleSession {
    encounter: Encounter,
    roster: Box<dyn RosterProvider + Send>,
    dice: Box<dyn DiceSource + Send>,
}

impl fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleSession")
            .field("encounter", &self.encounter)
            .finish_non_exhaustive()
    }
}

impl BattleSession {
    pub fn new(encounter: Encounter, roster: impl RosterProvider + Send + 'static) -> Self {
        Self::with_dice(encounter, roster, Box::new(RandomDice::new()))
    }

    pub fn with_dice(
        encounter: Encounter,
        roster: impl RosterProvider + Send + 'static,
        dice: Box<dyn DiceSource + Send>,
    ) -> Self {
        Self {
            encounter,
            roster: Box::new(roster),
            dice,
        }
    }

    /// Loads the type chart and saved roster named by `config` and starts a
    /// fresh encounter with its dice mode and validation policy.
    pub fn from_config(config: &CompanionConfig) -> CompanionResult<Self> {
        let chart = match &config.type_chart_path {
            Some(path) => TypeChart::load(path)?,
            None => TypeChart::standard()?,
        };
        let mut storage = PokemonStorage::new(FileStore::new(&config.roster_path));
        let seeded = storage.get_all();
        info!(
            roster = seeded.len(),
            path = %config.roster_path.display(),
            "roster loaded"
        );

        let encounter = Encounter::new(chart)
            .with_validation(config.type_validation)
            .with_dice_mode(config.dice_mode);
        Ok(Self::new(encounter, storage))
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn encounter_mut(&mut self) -> &mut Encounter {
        &mut self.encounter
    }

    pub fn roster(&self) -> Vec<RosterEntry> {
        self.roster.list_pokemon()
    }

    pub fn status(&self) -> String {
        format!(
            "{}\nAttack mode: {}",
            self.encounter,
            if self.encounter.attacker.is_special_attacker {
                AttackMode::Special
            } else {
                AttackMode::Physical
            }
        )
    }

    /// Runs one text command and returns the response.
    pub fn handle_command(&mut self, line: &str) -> String {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = parts.split_first() else {
            return "Enter a command, or 'help' for a list.".to_string();
        };

        let command = command.to_lowercase();
        match command.as_str() {
            "help" | "?" => HELP_TEXT.to_string(),
            "status" => self.status(),
            "log" => {
                let limit = args
                    .first()
                    .and_then(|n| n.parse::<usize>().ok())
                    .unwrap_or(DEFAULT_LOG_LINES);
                display_log(&self.encounter, limit)
            }
            "types" => display_type_chart(self.encounter.chart()),
            "roster" => display_roster(&self.roster()),
            "select" => self.select(args),
            "stat" | "hp" | "dice" | "bonus" => {
                let Some(side) = args.first().and_then(|s| parse_side(s)) else {
                    return format!("Usage: {} <a|d> <value>", command);
                };
                self.set_value(&command, side, args.get(1).copied().unwrap_or(""))
            }
            "type" => {
                let Some((side, names)) = args
                    .split_first()
                    .and_then(|(s, rest)| parse_side(s).map(|side| (side, rest)))
                else {
                    return "Usage: type <a|d> [t1] [t2]".to_string();
                };
                self.apply_types(side, names.iter().map(|n| TypeName::from(*n)).collect())
            }
            "mode" => self.set_dice_mode(args),
            "attack" => self.set_attack_mode(args),
            "roll" => self.roll(args),
            "resolve" => self.encounter.resolve_damage().to_string(),
            "reset" => {
                self.encounter.reset_round();
                "Round reset. HP and types kept.".to_string()
            }
            "next" => {
                self.encounter.next_round();
                self.encounter.log.latest().unwrap_or_default().to_string()
            }
            "swap" => {
                self.encounter.swap_sides();
                format!("Sides swapped.\n{}", self.encounter)
            }
            "clear" => {
                self.encounter.clear_log();
                "Battle log cleared.".to_string()
            }
            other => format!("Unknown command '{}'. Type 'help' for a list.", other),
        }
    }

    fn select(&mut self, args: &[&str]) -> String {
        let (Some(side), Some(index)) = (
            args.first().and_then(|s| parse_side(s)),
            args.get(1).and_then(|n| n.parse::<usize>().ok()),
        ) else {
            return "Usage: select <a|d> <roster number>".to_string();
        };
        let roster = self.roster();
        let Some(entry) = index.checked_sub(1).and_then(|i| roster.get(i)) else {
            return format!("No roster entry {}. Use 'roster' to list them.", index);
        };

        let advantage = match self.encounter.select_pokemon(side, entry) {
            Ok(advantage) => advantage,
            Err(e) => return format!("Error: {}", e),
        };
        let mut output = format!("{} is now {}.", side, self.encounter.combatant(side));
        let message = advantage.message();
        if !message.is_empty() {
            output.push('\n');
            output.push_str(&message);
        }
        output
    }

    /// Sets one numeric field of a side from free text.
    ///
    /// `field` must be one of [`VALUE_FIELDS`]; anything else is refused
    /// without touching the encounter.
    pub fn set_value(&mut self, field: &str, side: Side, text: &str) -> String {
        match field.to_lowercase().as_str() {
            "stat" => self.encounter.set_base_stat_text(side, text),
            "hp" => self.encounter.set_hp_text(side, text),
            "dice" => self.encounter.set_dice_text(side, text),
            "bonus" => self.encounter.set_extra_bonus_text(side, text),
            other => {
                return format!(
                    "Error: unknown field '{}'; expected one of {}",
                    other,
                    VALUE_FIELDS.join(", ")
                )
            }
        }
        format!("{}: {}", side, self.encounter.combatant(side))
    }

    /// Replaces a side's types and reports the new type bonus.
    pub fn apply_types(&mut self, side: Side, types: Vec<TypeName>) -> String {
        match self.encounter.set_types(side, types) {
            Ok(advantage) => {
                let bonus = advantage.bonus;
                let mut output = format!(
                    "Type bonus: {} +{}, {} +{}",
                    Side::Attacker,
                    bonus.attacker,
                    Side::Defender,
                    bonus.defender
                );
                let message = advantage.message();
                if !message.is_empty() {
                    output.push('\n');
                    output.push_str(&message);
                }
                output
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    fn set_dice_mode(&mut self, args: &[&str]) -> String {
        match args.first().and_then(|m| m.parse::<DiceMode>().ok()) {
            Some(mode) => {
                self.encounter.set_dice_mode(mode);
                format!("Dice mode: {}", mode)
            }
            None => "Usage: mode <manual|d6|d4>".to_string(),
        }
    }

    fn set_attack_mode(&mut self, args: &[&str]) -> String {
        match args.first().and_then(|m| m.parse::<AttackMode>().ok()) {
            Some(mode) => {
                self.encounter.set_attack_mode(mode);
                format!("Attack mode: {}\n{}: {}", mode, Side::Attacker, self.encounter.attacker)
            }
            None => "Usage: attack <physical|special>".to_string(),
        }
    }

    fn roll(&mut self, args: &[&str]) -> String {
        let Some(side) = args.first().and_then(|s| parse_side(s)) else {
            return "Usage: roll <a|d>".to_string();
        };
        match self.encounter.roll_dice(side, self.dice.as_mut()) {
            Some(_) => self.encounter.log.latest().unwrap_or_default().to_string(),
            None => "Dice mode is manual; enter the roll with 'dice <a|d> <value>'.".to_string(),
        }
    }
}
