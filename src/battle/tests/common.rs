use crate::battle::state::{Combatant, Encounter};
use crate::roster::{BaseStats, RosterEntry};
use crate::type_chart::TypeChart;
use schema::TypeName;

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```
/// let attacker = TestCombatantBuilder::new(15)
///     .with_types(&["火"])
///     .with_dice(4)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    base_stat: i32,
    name: Option<String>,
    types: Vec<TypeName>,
    dice_roll: i32,
    extra_bonus: i32,
    hp: Option<i32>,
}

impl TestCombatantBuilder {
    /// Creates a new builder with the given base stat.
    pub fn new(base_stat: i32) -> Self {
        Self {
            base_stat,
            name: None,
            types: Vec::new(),
            dice_roll: 0,
            extra_bonus: 0,
            hp: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| TypeName::from(*t)).collect();
        self
    }

    pub fn with_dice(mut self, roll: i32) -> Self {
        self.dice_roll = roll;
        self
    }

    pub fn with_extra(mut self, bonus: i32) -> Self {
        self.extra_bonus = bonus;
        self
    }

    /// Sets the HP. If not set, the default starting HP is kept.
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let mut combatant = Combatant::default();
        combatant.name = self.name;
        combatant.base_stat = self.base_stat;
        combatant.dice_roll = self.dice_roll;
        combatant.extra_bonus = self.extra_bonus;
        combatant.set_types(self.types);
        if let Some(hp) = self.hp {
            combatant.set_hp(hp);
        }
        combatant
    }
}

pub fn standard_chart() -> TypeChart {
    match TypeChart::standard() {
        Ok(chart) => chart,
        Err(err) => panic!("Failed to load the bundled type chart: {}", err),
    }
}

/// A fresh encounter on the bundled chart.
pub fn create_test_encounter() -> Encounter {
    Encounter::new(standard_chart())
}

/// An encounter with both combatants in place and the type bonus computed
/// from their types.
pub fn create_encounter_with(attacker: Combatant, defender: Combatant) -> Encounter {
    let mut encounter = create_test_encounter();
    encounter.attacker = attacker;
    encounter.defender = defender;
    encounter.update_type_bonus();
    encounter
}

pub fn roster_entry(id: u32, name: &str, types: &[&str], attack: i32, special_attack: i32) -> RosterEntry {
    RosterEntry {
        id,
        name: name.to_string(),
        owner: None,
        types: types.iter().map(|t| TypeName::from(*t)).collect(),
        stats: BaseStats {
            hp: 40,
            attack,
            defense: 40,
            special_attack,
            special_defense: 40,
            speed: 40,
        },
    }
}

/// Looks up one of the bundled starters by name.
pub fn starter(name: &str) -> RosterEntry {
    let roster = match crate::roster::default_roster() {
        Ok(roster) => roster,
        Err(err) => panic!("Failed to load the bundled roster: {}", err),
    };
    match roster.into_iter().find(|entry| entry.name == name) {
        Some(entry) => entry,
        None => panic!("{} is not a bundled starter", name),
    }
}
