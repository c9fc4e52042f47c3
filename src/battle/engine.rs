use crate::battle::dice::DiceSource;
use crate::battle::events::{BattleEvent, DamageOutcome};
use crate::battle::state::{
    side_index, Combatant, Encounter, RoundPhase, TypeValidation, MAX_TYPES,
};
use crate::campaign::{EventDetails, NewEvent};
use crate::errors::{TypeChartError, TypeChartResult};
use crate::input::parse_int_or_zero;
use crate::roster::{default_roster, RosterEntry};
use crate::type_chart::{TypeAdvantage, TypeBonus, TypeChart};
use schema::{AttackMode, DiceMode, EventKind, Side, TypeName};
use tracing::{debug, warn};

impl Encounter {
    /// A fresh encounter: both sides at base stat 10, 50 HP, no types, manual
    /// dice and an empty log.
    pub fn new(chart: TypeChart) -> Self {
        let stat_reference = default_roster().unwrap_or_else(|e| {
            warn!("bundled roster unavailable for attack-mode lookups: {}", e);
            Vec::new()
        });

        Self {
            attacker: Combatant::default(),
            defender: Combatant::default(),
            type_bonus: TypeBonus::default(),
            dice_mode: DiceMode::Manual,
            log: Default::default(),
            phase: RoundPhase::Idle,
            rolled: [false; 2],
            chart,
            validation: TypeValidation::Permissive,
            stat_reference,
        }
    }

    pub fn with_validation(mut self, validation: TypeValidation) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_dice_mode(mut self, dice_mode: DiceMode) -> Self {
        self.dice_mode = dice_mode;
        self
    }

    /// Replaces the roster that attack-mode changes look names up in.
    ///
    /// By default this is the bundled default roster, not the player's saved
    /// one.
    pub fn with_stat_reference(mut self, roster: Vec<RosterEntry>) -> Self {
        self.stat_reference = roster;
        self
    }

    pub fn set_dice_mode(&mut self, dice_mode: DiceMode) {
        self.dice_mode = dice_mode;
    }

    /// Rolls the current die for `side` and logs the result.
    ///
    /// Does nothing in manual mode and returns `None`.
    pub fn roll_dice<D: DiceSource + ?Sized>(&mut self, side: Side, dice: &mut D) -> Option<i32> {
        let faces = self.dice_mode.faces()?;
        let roll = i32::from(dice.roll(faces));

        self.combatant_mut(side).dice_roll = roll;
        self.rolled[side_index(side)] = true;
        if self.phase == RoundPhase::Idle {
            self.phase = RoundPhase::Rolled;
        }
        self.log.record(&BattleEvent::DiceRolled { side, roll });
        debug!(?side, roll, faces, "dice rolled");

        Some(roll)
    }

    /// Recomputes the type bonus from both sides' current types.
    ///
    /// A non-empty matchup message is logged as a single entry.
    pub fn update_type_bonus(&mut self) -> TypeAdvantage {
        let advantage = self
            .chart
            .calculate_type_advantage(&self.attacker.types, &self.defender.types);
        self.type_bonus = advantage.bonus;

        let message = advantage.message();
        if !message.is_empty() {
            self.log.record(&BattleEvent::TypeMatchups { message });
        }
        debug!(
            attacker = self.type_bonus.attacker,
            defender = self.type_bonus.defender,
            "type bonus updated"
        );

        advantage
    }

    /// Replaces a side's types and recomputes the type bonus.
    ///
    /// In permissive mode unknown names are kept (aggregation skips them) and
    /// anything past the second type is dropped. In strict mode both cases
    /// are rejected and nothing changes.
    pub fn set_types(&mut self, side: Side, types: Vec<TypeName>) -> TypeChartResult<TypeAdvantage> {
        self.check_types(&types)?;
        self.combatant_mut(side).set_types(types);
        Ok(self.update_type_bonus())
    }

    /// Fills a side from a roster entry and recomputes the type bonus.
    ///
    /// The base stat comes from attack or special attack depending on the
    /// combatant's attack mode. The entry's types go through the same
    /// validation as [`set_types`](Self::set_types); a strict-mode rejection
    /// leaves the side untouched.
    pub fn select_pokemon(&mut self, side: Side, entry: &RosterEntry) -> TypeChartResult<TypeAdvantage> {
        self.check_types(&entry.types)?;

        let combatant = self.combatant_mut(side);
        combatant.name = Some(entry.name.clone());
        combatant.base_stat = entry.offensive_stat(combatant.is_special_attacker);
        combatant.set_types(entry.types.iter().cloned());
        combatant.set_hp(entry.stats.hp);
        debug!(?side, name = %entry.name, "combatant selected from roster");

        Ok(self.update_type_bonus())
    }

    fn check_types(&self, types: &[TypeName]) -> TypeChartResult<()> {
        match self.validation {
            TypeValidation::Strict => {
                if types.len() > MAX_TYPES {
                    return Err(TypeChartError::TooManyTypes {
                        max: MAX_TYPES,
                        given: types.len(),
                    });
                }
                self.chart.validate_types(types)
            }
            TypeValidation::Permissive => {
                for unknown in types.iter().filter(|t| !self.chart.contains(t.as_str())) {
                    warn!(%unknown, "type not in chart; it will not affect bonuses");
                }
                Ok(())
            }
        }
    }

    /// Compares both totals and applies damage to the losing side.
    ///
    /// A higher attacker total damages the defender by the difference. Any
    /// other result reflects `difference - 1` back to the attacker, so a tie
    /// or a one-point deficit costs nothing.
    pub fn resolve_damage(&mut self) -> DamageOutcome {
        let (attacker_total, defender_total) = self.totals();

        let outcome = if attacker_total > defender_total {
            let damage = attacker_total - defender_total;
            let defender_hp = self.defender.take_damage(damage);
            DamageOutcome::DefenseBroken {
                damage,
                defender_hp,
            }
        } else {
            let reflect = (defender_total - attacker_total - 1).max(0);
            let attacker_hp = self.attacker.take_damage(reflect);
            if reflect > 0 {
                DamageOutcome::Reflected {
                    damage: reflect,
                    attacker_hp,
                }
            } else {
                DamageOutcome::NoReflect
            }
        };

        self.phase = RoundPhase::Resolved;
        self.log.record(&BattleEvent::Damage(outcome));
        debug!(attacker_total, defender_total, ?outcome, "damage resolved");

        outcome
    }

    /// Clears dice, extra bonuses and the type bonus. HP, types, base stats
    /// and the log are kept.
    pub fn reset_round(&mut self) {
        for combatant in [&mut self.attacker, &mut self.defender] {
            combatant.dice_roll = 0;
            combatant.extra_bonus = 0;
        }
        self.type_bonus = TypeBonus::default();
        self.rolled = [false; 2];
        self.phase = RoundPhase::Idle;
    }

    /// Resets the round and marks the boundary in the log.
    pub fn next_round(&mut self) {
        self.reset_round();
        self.log.record(&BattleEvent::RoundAdvanced);
    }

    /// Exchanges the attacker and defender records wholesale.
    ///
    /// The log and the type bonus are left alone.
    pub fn swap_sides(&mut self) {
        std::mem::swap(&mut self.attacker, &mut self.defender);
        self.rolled.swap(0, 1);
    }

    /// Switches the attacker between physical and special attacks.
    ///
    /// If the attacker's name matches the stat reference roster, its base
    /// stat is re-read from the matching stat. No match, or a zero stat,
    /// leaves the base stat as it is.
    pub fn set_attack_mode(&mut self, mode: AttackMode) {
        let special = mode.is_special();
        self.attacker.is_special_attacker = special;

        let Some(name) = self.attacker.name.as_deref() else {
            return;
        };
        let derived = self
            .stat_reference
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.offensive_stat(special))
            .filter(|stat| *stat != 0);

        match derived {
            Some(stat) => self.attacker.base_stat = stat,
            None => debug!(name, "no reference stats; keeping base stat"),
        }
    }

    pub fn set_base_stat_text(&mut self, side: Side, text: &str) {
        self.combatant_mut(side).base_stat = parse_int_or_zero(text);
    }

    pub fn set_hp_text(&mut self, side: Side, text: &str) {
        self.combatant_mut(side).set_hp(parse_int_or_zero(text));
    }

    pub fn set_dice_text(&mut self, side: Side, text: &str) {
        self.combatant_mut(side).dice_roll = parse_int_or_zero(text);
    }

    pub fn set_extra_bonus_text(&mut self, side: Side, text: &str) {
        self.combatant_mut(side).extra_bonus = parse_int_or_zero(text);
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// A `BATTLE` timeline event describing where the encounter stands.
    pub fn summary_event(&self, player_id: impl Into<String>, round_number: u32) -> NewEvent {
        let result = match (self.attacker.is_fainted(), self.defender.is_fainted()) {
            (_, true) => format!("{} 倒下", Side::Defender),
            (true, false) => format!("{} 倒下", Side::Attacker),
            (false, false) => "未分胜负".to_string(),
        };

        NewEvent {
            round_number,
            player_id: player_id.into(),
            title: format!(
                "{} vs {}",
                self.attacker.display_name(),
                self.defender.display_name()
            ),
            description: Some(format!(
                "{} HP {} / {} HP {}",
                Side::Attacker,
                self.attacker.hp(),
                Side::Defender,
                self.defender.hp()
            )),
            kind: EventKind::Battle,
            details: Some(EventDetails {
                pokemon_name: self.attacker.name.clone(),
                battle_result: Some(result),
                ..Default::default()
            }),
        }
    }
}
