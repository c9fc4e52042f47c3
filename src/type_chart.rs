//! Elemental type relationships and the additive type-bonus calculation.
//!
//! A chart maps each defending type to the attacking types it resists, is weak
//! to, and is immune to. Bonuses are flat additions to a side's total rather
//! than multipliers, which keeps the arithmetic easy to do at the table.

use crate::errors::{TypeChartError, TypeChartResult};
use schema::{TypeChartEntry, TypeName, TypeRelation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

/// Bonus granted to the attacker when the defender is weak to its type.
pub const WEAKNESS_BONUS: i32 = 3;
/// Bonus granted to the defender when it resists the attacking type.
pub const RESISTANCE_BONUS: i32 = 3;
/// Bonus granted to the defender when it is immune to the attacking type.
pub const IMMUNITY_BONUS: i32 = 5;

const BUNDLED_CHART: &str = include_str!("../data/type_chart.ron");

static STANDARD_CHART: LazyLock<TypeChartResult<TypeChart>> =
    LazyLock::new(|| TypeChart::from_ron_str(BUNDLED_CHART));

/// The effect a single attacking type has on a single defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchupEffect {
    /// The defender is weak: attacker gains a bonus.
    SuperEffective,
    /// The defender resists: defender gains a bonus.
    Resisted,
    /// The defender is immune: defender gains a larger bonus.
    Immune,
}

impl MatchupEffect {
    pub fn amount(&self) -> i32 {
        match self {
            MatchupEffect::SuperEffective => WEAKNESS_BONUS,
            MatchupEffect::Resisted => RESISTANCE_BONUS,
            MatchupEffect::Immune => IMMUNITY_BONUS,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            MatchupEffect::SuperEffective => "进攻方克制",
            MatchupEffect::Resisted => "防守方抗性",
            MatchupEffect::Immune => "防守方免疫",
        }
    }
}

/// One attacking/defending pair that produced a bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupTrace {
    pub attacking: TypeName,
    pub defending: TypeName,
    pub effect: MatchupEffect,
}

impl fmt::Display for MatchupTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}: {} +{}",
            self.attacking,
            self.defending,
            self.effect.description(),
            self.effect.amount()
        )
    }
}

/// Additive bonuses each side receives from type matchups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBonus {
    pub attacker: i32,
    pub defender: i32,
}

/// Result of aggregating every attacker/defender type pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAdvantage {
    pub bonus: TypeBonus,
    pub matchups: Vec<MatchupTrace>,
}

impl TypeAdvantage {
    /// All pair traces joined by newlines, or an empty string when no pair
    /// produced a bonus.
    pub fn message(&self) -> String {
        self.matchups
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChart {
    names: Vec<TypeName>,
    relations: HashMap<TypeName, TypeRelation>,
}

impl TypeChart {
    /// The bundled chart.
    pub fn standard() -> TypeChartResult<TypeChart> {
        STANDARD_CHART.clone()
    }

    /// Builds a chart from entries, rejecting duplicate names and any
    /// attacking type listed twice for the same defending type.
    pub fn from_entries(entries: Vec<TypeChartEntry>) -> TypeChartResult<TypeChart> {
        let mut names = Vec::with_capacity(entries.len());
        let mut relations = HashMap::with_capacity(entries.len());

        for entry in entries {
            let (name, relation) = entry.into_parts();
            validate_relation(&name, &relation)?;
            if relations.contains_key(&name) {
                return Err(TypeChartError::DuplicateType(name));
            }
            names.push(name.clone());
            relations.insert(name, relation);
        }

        Ok(TypeChart { names, relations })
    }

    pub fn from_ron_str(source: &str) -> TypeChartResult<TypeChart> {
        let entries: Vec<TypeChartEntry> =
            ron::from_str(source).map_err(|e| TypeChartError::Malformed(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Loads a custom chart from a RON file.
    pub fn load(path: &Path) -> TypeChartResult<TypeChart> {
        let source = fs::read_to_string(path).map_err(|e| TypeChartError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let chart = Self::from_ron_str(&source)?;
        info!(path = %path.display(), types = chart.len(), "loaded type chart");
        Ok(chart)
    }

    pub fn lookup(&self, type_name: &str) -> Option<&TypeRelation> {
        self.relations.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.relations.contains_key(type_name)
    }

    /// Type names in the order the chart defines them.
    pub fn type_names(&self) -> &[TypeName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fails on the first name the chart does not define.
    pub fn validate_types(&self, types: &[TypeName]) -> TypeChartResult<()> {
        match types.iter().find(|t| !self.contains(t.as_str())) {
            Some(unknown) => Err(TypeChartError::UnknownType(unknown.clone())),
            None => Ok(()),
        }
    }

    /// Effect of one attacking type on one defending type, if any.
    ///
    /// Weakness is checked before resistance, which is checked before
    /// immunity; at most one effect applies. Unknown defending types have no
    /// effect.
    pub fn matchup(&self, attacking: &str, defending: &str) -> Option<MatchupEffect> {
        let relation = self.lookup(defending)?;
        if relation.is_weak_to(attacking) {
            Some(MatchupEffect::SuperEffective)
        } else if relation.resists(attacking) {
            Some(MatchupEffect::Resisted)
        } else if relation.is_immune_to(attacking) {
            Some(MatchupEffect::Immune)
        } else {
            None
        }
    }

    /// Sums the type bonuses for every (attacking, defending) combination.
    ///
    /// Attacker types form the outer loop and defender types the inner loop;
    /// the traces keep that order. If either side has no types the result is
    /// empty with zero bonuses.
    pub fn calculate_type_advantage(
        &self,
        attacker_types: &[TypeName],
        defender_types: &[TypeName],
    ) -> TypeAdvantage {
        let mut advantage = TypeAdvantage::default();
        if attacker_types.is_empty() || defender_types.is_empty() {
            return advantage;
        }

        for attacking in attacker_types {
            for defending in defender_types {
                let Some(effect) = self.matchup(attacking.as_str(), defending.as_str()) else {
                    continue;
                };
                match effect {
                    MatchupEffect::SuperEffective => advantage.bonus.attacker += effect.amount(),
                    MatchupEffect::Resisted | MatchupEffect::Immune => {
                        advantage.bonus.defender += effect.amount()
                    }
                }
                advantage.matchups.push(MatchupTrace {
                    attacking: attacking.clone(),
                    defending: defending.clone(),
                    effect,
                });
            }
        }

        advantage
    }
}

fn validate_relation(defending: &TypeName, relation: &TypeRelation) -> TypeChartResult<()> {
    let lists: [(&'static str, &[TypeName]); 3] = [
        ("resist", &relation.resist),
        ("weak", &relation.weak),
        ("immune", &relation.immune),
    ];

    for (i, &(first, first_list)) in lists.iter().enumerate() {
        for &(second, second_list) in &lists[i + 1..] {
            if let Some(attacking) = first_list.iter().find(|t| second_list.contains(*t)) {
                return Err(TypeChartError::OverlappingRelation {
                    defending: defending.clone(),
                    attacking: attacking.clone(),
                    first,
                    second,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn types(names: &[&str]) -> Vec<TypeName> {
        names.iter().map(|n| TypeName::from(*n)).collect()
    }

    fn chart() -> TypeChart {
        TypeChart::standard().expect("bundled chart should load")
    }

    #[test]
    fn test_bundled_chart_loads_all_types() {
        let chart = chart();
        assert_eq!(chart.len(), 16);
        assert_eq!(chart.type_names()[0].as_str(), "一般");
        assert_eq!(chart.type_names()[15].as_str(), "水");
        assert!(chart.lookup("火").is_some());
        assert!(chart.lookup("恶").is_none(), "恶 is referenced but not defined");
    }

    #[rstest]
    #[case(&[], &["火"])]
    #[case(&["火"], &[])]
    #[case(&[], &[])]
    fn test_empty_side_yields_nothing(#[case] attacker: &[&str], #[case] defender: &[&str]) {
        let advantage = chart().calculate_type_advantage(&types(attacker), &types(defender));
        assert_eq!(advantage.bonus, TypeBonus::default());
        assert_eq!(advantage.message(), "");
        assert!(advantage.matchups.is_empty());
    }

    #[test]
    fn test_water_against_grass_fire() {
        let advantage = chart().calculate_type_advantage(&types(&["水"]), &types(&["草", "火"]));

        assert_eq!(advantage.bonus, TypeBonus { attacker: 3, defender: 3 });
        assert_eq!(
            advantage.message(),
            "水 → 草: 防守方抗性 +3\n水 → 火: 进攻方克制 +3"
        );
    }

    #[test]
    fn test_water_against_electric_follows_table() {
        // 电 only lists 地面 as a weakness.
        let advantage = chart().calculate_type_advantage(&types(&["水"]), &types(&["草", "电"]));

        assert_eq!(advantage.bonus, TypeBonus { attacker: 0, defender: 3 });
        assert_eq!(advantage.message(), "水 → 草: 防守方抗性 +3");
    }

    #[rstest]
    #[case("火")]
    #[case("水")]
    #[case("草")]
    #[case("电")]
    #[case("冰")]
    #[case("钢")]
    #[case("超能")]
    #[case("毒")]
    fn test_self_resisting_types_hit_resist_branch(#[case] name: &str) {
        let chart = chart();
        assert!(chart.lookup(name).unwrap().resists(name));
        assert_eq!(chart.matchup(name, name), Some(MatchupEffect::Resisted));

        let advantage = chart.calculate_type_advantage(&types(&[name]), &types(&[name]));
        assert_eq!(advantage.bonus, TypeBonus { attacker: 0, defender: 3 });
    }

    #[test]
    fn test_immunity_grants_five() {
        let advantage = chart().calculate_type_advantage(&types(&["一般"]), &types(&["鬼"]));
        assert_eq!(advantage.bonus, TypeBonus { attacker: 0, defender: 5 });
        assert_eq!(advantage.message(), "一般 → 鬼: 防守方免疫 +5");
    }

    #[test]
    fn test_all_combinations_are_summed_in_order() {
        // 地面 → 飞行 is an immunity, the other three pairs are weak/resist.
        let advantage =
            chart().calculate_type_advantage(&types(&["格斗", "地面"]), &types(&["岩石", "飞行"]));

        let pairs: Vec<(String, String, MatchupEffect)> = advantage
            .matchups
            .iter()
            .map(|m| (m.attacking.to_string(), m.defending.to_string(), m.effect))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("格斗".into(), "岩石".into(), MatchupEffect::SuperEffective),
                ("格斗".into(), "飞行".into(), MatchupEffect::Resisted),
                ("地面".into(), "岩石".into(), MatchupEffect::SuperEffective),
                ("地面".into(), "飞行".into(), MatchupEffect::Immune),
            ]
        );
        assert_eq!(advantage.bonus, TypeBonus { attacker: 6, defender: 8 });
        assert_eq!(advantage.message().lines().count(), 4);
    }

    #[test]
    fn test_unknown_defending_type_is_skipped() {
        let advantage = chart().calculate_type_advantage(&types(&["水"]), &types(&["妖精", "火"]));
        assert_eq!(advantage.bonus, TypeBonus { attacker: 3, defender: 0 });
        assert_eq!(advantage.message(), "水 → 火: 进攻方克制 +3");
    }

    #[test]
    fn test_overlapping_lists_are_rejected() {
        let result = TypeChart::from_ron_str(
            r#"[(name: "火", resist: ["水"], weak: ["水"], immune: [])]"#,
        );
        assert_eq!(
            result,
            Err(TypeChartError::OverlappingRelation {
                defending: "火".into(),
                attacking: "水".into(),
                first: "resist",
                second: "weak",
            })
        );
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = TypeChart::from_ron_str(
            r#"[(name: "火", resist: [], weak: [], immune: []), (name: "火")]"#,
        );
        assert_eq!(result, Err(TypeChartError::DuplicateType("火".into())));
    }

    #[test]
    fn test_malformed_source_is_reported() {
        assert!(matches!(
            TypeChart::from_ron_str("not a chart"),
            Err(TypeChartError::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_types_names_the_first_unknown() {
        let chart = chart();
        assert_eq!(chart.validate_types(&types(&["火", "水"])), Ok(()));
        assert_eq!(
            chart.validate_types(&types(&["火", "妖精", "恶"])),
            Err(TypeChartError::UnknownType("妖精".into()))
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.ron");
        fs::write(&path, r#"[(name: "光", resist: ["暗"], weak: [], immune: [])]"#).unwrap();

        let chart = TypeChart::load(&path).unwrap();
        assert_eq!(chart.matchup("暗", "光"), Some(MatchupEffect::Resisted));

        let missing = TypeChart::load(&dir.path().join("missing.ron"));
        assert!(matches!(missing, Err(TypeChartError::Unreadable { .. })));
    }
}
