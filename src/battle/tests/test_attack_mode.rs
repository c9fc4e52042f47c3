#[cfg(test)]
mod tests {
    use crate::battle::tests::common::{create_test_encounter, roster_entry, starter, TestCombatantBuilder};
    use pretty_assertions::assert_eq;
    use schema::{AttackMode, Side};

    #[test]
    fn test_toggle_rederives_from_bundled_roster() {
        let mut encounter = create_test_encounter();
        encounter.select_pokemon(Side::Attacker, &starter("小火龙")).unwrap();
        assert_eq!(encounter.attacker.base_stat, 52);

        encounter.set_attack_mode(AttackMode::Special);
        assert!(encounter.attacker.is_special_attacker);
        assert_eq!(encounter.attacker.base_stat, 60);

        encounter.set_attack_mode(AttackMode::Physical);
        assert!(!encounter.attacker.is_special_attacker);
        assert_eq!(encounter.attacker.base_stat, 52);
    }

    #[test]
    fn test_unmatched_name_keeps_base_stat() {
        let mut encounter = create_test_encounter();
        encounter.attacker = TestCombatantBuilder::new(30).named("皮卡丘").build();

        encounter.set_attack_mode(AttackMode::Special);

        assert!(encounter.attacker.is_special_attacker);
        assert_eq!(encounter.attacker.base_stat, 30);
    }

    #[test]
    fn test_unnamed_attacker_only_changes_flag() {
        let mut encounter = create_test_encounter();
        encounter.attacker.base_stat = 25;

        encounter.set_attack_mode(AttackMode::Special);

        assert!(encounter.attacker.is_special_attacker);
        assert_eq!(encounter.attacker.base_stat, 25);
    }

    #[test]
    fn test_saved_pokemon_are_not_consulted_by_default() {
        // Selection works from the saved roster, but the toggle only knows
        // the bundled starters.
        let pikachu = roster_entry(25, "皮卡丘", &["电"], 55, 50);
        let mut encounter = create_test_encounter();
        encounter.select_pokemon(Side::Attacker, &pikachu).unwrap();
        assert_eq!(encounter.attacker.base_stat, 55);

        encounter.set_attack_mode(AttackMode::Special);

        assert_eq!(encounter.attacker.base_stat, 55);
    }

    #[test]
    fn test_custom_stat_reference() {
        let pikachu = roster_entry(25, "皮卡丘", &["电"], 55, 50);
        let mut encounter = create_test_encounter().with_stat_reference(vec![pikachu.clone()]);
        encounter.select_pokemon(Side::Attacker, &pikachu).unwrap();

        encounter.set_attack_mode(AttackMode::Special);

        assert_eq!(encounter.attacker.base_stat, 50);
    }

    #[test]
    fn test_zero_reference_stat_keeps_base_stat() {
        let shell = roster_entry(213, "壶壶", &["虫", "岩石"], 10, 0);
        let mut encounter = create_test_encounter().with_stat_reference(vec![shell.clone()]);
        encounter.select_pokemon(Side::Attacker, &shell).unwrap();

        encounter.set_attack_mode(AttackMode::Special);

        assert_eq!(encounter.attacker.base_stat, 10);
    }

    #[test]
    fn test_selection_respects_current_mode() {
        let mut encounter = create_test_encounter();
        encounter.set_attack_mode(AttackMode::Special);

        encounter.select_pokemon(Side::Attacker, &starter("妙蛙种子")).unwrap();
        encounter.select_pokemon(Side::Defender, &starter("妙蛙种子")).unwrap();

        // Only the attacker follows the toggle.
        assert_eq!(encounter.attacker.base_stat, 65);
        assert_eq!(encounter.defender.base_stat, 49);
    }

    #[test]
    fn test_toggle_leaves_defender_alone() {
        let mut encounter = create_test_encounter();
        encounter.select_pokemon(Side::Defender, &starter("杰尼龟")).unwrap();

        encounter.set_attack_mode(AttackMode::Special);

        assert!(!encounter.defender.is_special_attacker);
        assert_eq!(encounter.defender.base_stat, 48);
    }
}
