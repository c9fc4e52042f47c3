#[cfg(test)]
mod tests {
    use crate::battle::state::TypeValidation;
    use crate::battle::tests::common::{create_test_encounter, roster_entry, starter};
    use crate::errors::TypeChartError;
    use crate::type_chart::TypeBonus;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Side, TypeName};

    fn names(types: &[&str]) -> Vec<TypeName> {
        types.iter().map(|t| TypeName::from(*t)).collect()
    }

    #[rstest]
    #[case(&["火"], &["草"], TypeBonus { attacker: 3, defender: 0 }, "火 → 草: 进攻方克制 +3")]
    #[case(&["火"], &["水"], TypeBonus { attacker: 0, defender: 3 }, "火 → 水: 防守方抗性 +3")]
    #[case(&["一般"], &["鬼"], TypeBonus { attacker: 0, defender: 5 }, "一般 → 鬼: 防守方免疫 +5")]
    #[case(&["电"], &["地面", "飞行"], TypeBonus { attacker: 3, defender: 5 }, "电 → 地面: 防守方免疫 +5\n电 → 飞行: 进攻方克制 +3")]
    fn test_set_types_recomputes_bonus(
        #[case] attacker: &[&str],
        #[case] defender: &[&str],
        #[case] expected: TypeBonus,
        #[case] message: &str,
    ) {
        let mut encounter = create_test_encounter();

        encounter.set_types(Side::Defender, names(defender)).unwrap();
        let advantage = encounter.set_types(Side::Attacker, names(attacker)).unwrap();

        assert_eq!(advantage.bonus, expected);
        assert_eq!(encounter.type_bonus, expected);
        assert_eq!(encounter.log.latest(), Some(message));
    }

    #[test]
    fn test_setting_one_side_uses_the_new_types() {
        let mut encounter = create_test_encounter();
        encounter.set_types(Side::Attacker, names(&["水"])).unwrap();
        encounter.set_types(Side::Defender, names(&["火"])).unwrap();
        assert_eq!(encounter.type_bonus, TypeBonus { attacker: 3, defender: 0 });

        // Changing the defender must not leave the bonus of the old types.
        encounter.set_types(Side::Defender, names(&["草"])).unwrap();
        assert_eq!(encounter.type_bonus, TypeBonus { attacker: 0, defender: 3 });
    }

    #[test]
    fn test_clearing_types_zeroes_bonus_without_logging() {
        let mut encounter = create_test_encounter();
        encounter.set_types(Side::Attacker, names(&["水"])).unwrap();
        encounter.set_types(Side::Defender, names(&["火"])).unwrap();
        let logged = encounter.log.len();

        encounter.set_types(Side::Defender, Vec::new()).unwrap();

        assert_eq!(encounter.type_bonus, TypeBonus::default());
        assert_eq!(encounter.log.len(), logged);
    }

    #[test]
    fn test_permissive_keeps_first_two_and_skips_unknown() {
        let mut encounter = create_test_encounter();
        assert_eq!(encounter.validation(), TypeValidation::Permissive);

        encounter
            .set_types(Side::Defender, names(&["光", "草", "龙"]))
            .unwrap();
        let advantage = encounter.set_types(Side::Attacker, names(&["火"])).unwrap();

        let kept: Vec<&str> = encounter.defender.types.iter().map(TypeName::as_str).collect();
        assert_eq!(kept, vec!["光", "草"]);
        // 光 is not in the chart, so only 火 → 草 counts.
        assert_eq!(advantage.bonus, TypeBonus { attacker: 3, defender: 0 });
        assert_eq!(advantage.matchups.len(), 1);
    }

    #[test]
    fn test_strict_rejects_unknown_and_extra_types() {
        let mut encounter = create_test_encounter().with_validation(TypeValidation::Strict);
        encounter.set_types(Side::Defender, names(&["草"])).unwrap();

        assert_eq!(
            encounter.set_types(Side::Attacker, names(&["光"])),
            Err(TypeChartError::UnknownType(TypeName::from("光")))
        );
        assert_eq!(
            encounter.set_types(Side::Attacker, names(&["火", "飞行", "龙"])),
            Err(TypeChartError::TooManyTypes { max: 2, given: 3 })
        );
        // Rejected calls leave the side untouched.
        assert!(encounter.attacker.types.is_empty());
        assert_eq!(encounter.type_bonus, TypeBonus::default());

        assert!(encounter.set_types(Side::Attacker, names(&["火", "飞行"])).is_ok());
        assert_eq!(encounter.type_bonus, TypeBonus { attacker: 6, defender: 0 });
    }

    #[test]
    fn test_select_pokemon_fills_side_and_bonus() {
        let mut encounter = create_test_encounter();

        encounter.select_pokemon(Side::Attacker, &starter("杰尼龟")).unwrap();
        let advantage = encounter.select_pokemon(Side::Defender, &starter("小火龙")).unwrap();

        assert_eq!(encounter.attacker.name.as_deref(), Some("杰尼龟"));
        assert_eq!(encounter.attacker.base_stat, 48);
        assert_eq!(encounter.attacker.hp(), 44);
        assert_eq!(encounter.defender.base_stat, 52);
        assert_eq!(encounter.defender.hp(), 39);
        assert_eq!(advantage.bonus, TypeBonus { attacker: 3, defender: 0 });
        assert_eq!(encounter.log.latest(), Some("水 → 火: 进攻方克制 +3"));
    }

    #[test]
    fn test_select_dual_type_defender() {
        let mut encounter = create_test_encounter();
        encounter.select_pokemon(Side::Attacker, &starter("杰尼龟")).unwrap();

        let advantage = encounter.select_pokemon(Side::Defender, &starter("妙蛙种子")).unwrap();

        let types: Vec<&str> = encounter.defender.types.iter().map(TypeName::as_str).collect();
        assert_eq!(types, vec!["草", "毒"]);
        assert_eq!(advantage.bonus, TypeBonus { attacker: 0, defender: 3 });
        assert_eq!(advantage.message(), "水 → 草: 防守方抗性 +3");
    }

    #[test]
    fn test_strict_selection_rejects_roster_entry_with_bad_types() {
        let mut encounter = create_test_encounter().with_validation(TypeValidation::Strict);
        encounter.select_pokemon(Side::Defender, &starter("小火龙")).unwrap();
        let before = encounter.attacker.clone();

        let crowded = roster_entry(99, "怪", &["光", "火", "龙"], 10, 10);
        assert_eq!(
            encounter.select_pokemon(Side::Attacker, &crowded),
            Err(TypeChartError::TooManyTypes { max: 2, given: 3 })
        );
        let unknown = roster_entry(98, "怪", &["光", "火"], 10, 10);
        assert_eq!(
            encounter.select_pokemon(Side::Attacker, &unknown),
            Err(TypeChartError::UnknownType(TypeName::from("光")))
        );

        // Nothing from the rejected entries reaches the side.
        assert_eq!(encounter.attacker, before);
        assert!(encounter.attacker.name.is_none());
        assert!(encounter.attacker.types.is_empty());
        assert_eq!(encounter.type_bonus, TypeBonus::default());
    }

    #[test]
    fn test_permissive_selection_keeps_entry_types() {
        let mut encounter = create_test_encounter();
        encounter.select_pokemon(Side::Defender, &starter("妙蛙种子")).unwrap();

        let odd = roster_entry(99, "怪", &["光", "火", "龙"], 10, 10);
        let advantage = encounter.select_pokemon(Side::Attacker, &odd).unwrap();

        let kept: Vec<&str> = encounter.attacker.types.iter().map(TypeName::as_str).collect();
        assert_eq!(kept, vec!["光", "火"]);
        assert_eq!(encounter.attacker.name.as_deref(), Some("怪"));
        assert_eq!(advantage.bonus, TypeBonus { attacker: 3, defender: 0 });
    }
}
