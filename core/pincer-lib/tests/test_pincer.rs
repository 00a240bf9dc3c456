//! 夾擊判定與回合結束後的攻擊連鎖

mod test_helpers;

use pincer_lib::*;
use proptest::prelude::*;
use test_helpers::*;

fn pincer(enemy: &str, a: &str, b: &str) -> Pincer {
    Pincer {
        enemy: enemy.to_string(),
        ally_a: a.to_string(),
        ally_b: b.to_string(),
    }
}

#[test]
fn test_single_enemy_row_pincer() {
    let (board, _) = load_from_ascii(
        r#"
        . . . .
        . . . .
        . . . .
        . pl e1 pr
        "#,
    )
    .unwrap();
    assert_eq!(find_pincers(&board), vec![pincer("e1", "pl", "pr")]);
}

#[test]
fn test_boss_pincer_is_footprint_aware() {
    let (board, _) = load_from_ascii(
        r#"
        . . . . . .
        . . pt . . .
        . . B1 B1 . .
        . . B1 B1 . .
        . . pb . . .
        "#,
    )
    .unwrap();
    assert_eq!(find_pincers(&board), vec![pincer("B1", "pt", "pb")]);

    let (board, _) = load_from_ascii(
        r#"
        . . . . . .
        . . B1 B1 . .
        . p1 B1 B1 p2 .
        "#,
    )
    .unwrap();
    assert_eq!(find_pincers(&board), vec![pincer("B1", "p1", "p2")]);
}

#[test]
fn test_diagonal_neighbours_do_not_pincer() {
    let (board, _) = load_from_ascii(
        r#"
        p1 . .
        . e1 .
        . . p2
        "#,
    )
    .unwrap();
    assert!(find_pincers(&board).is_empty());
}

#[test]
fn test_drop_triggers_pincer_and_attack_chain() {
    let mut catalog = Catalog::default();
    catalog.abilities.insert(
        "slash".to_string(),
        ability(AbilityKind::Attack, 1, Some(5), None),
    );
    let mut battle = battle_with(
        r#"
        . . . .
        p1 e1 . p2
        . . . .
        p3 . . .
        "#,
        catalog,
        RulesConfig::default(),
    );
    grant(&mut battle, "p1", &["slash"]);
    grant(&mut battle, "p2", &["slash"]);

    drag(&mut battle, "p2", &[(1, 2)]);
    battle.drain_events();
    let reason = battle.release(None).unwrap();
    assert_eq!(reason, TurnEndReason::ManualDrop);

    // 攻擊力 10，傷害 5 + (5 + 10) = 20，p1、p2 各打一次；p3 沒有技能
    assert_eq!(hp(&battle, "e1"), 60);
    let events = battle.drain_events();
    assert_eq!(
        events,
        vec![
            Event::TurnEnded {
                reason: TurnEndReason::ManualDrop
            },
            Event::PincerTriggered {
                enemy: "e1".to_string(),
                ally_a: "p1".to_string(),
                ally_b: "p2".to_string(),
            },
            Event::ChainTriggered {
                seeds: vec!["p1".to_string(), "p2".to_string()],
                members: vec!["p1".to_string(), "p2".to_string(), "p3".to_string()],
                target: "e1".to_string(),
            },
            Event::HpChanged {
                unit_id: "e1".to_string(),
                hp: 80
            },
            Event::AbilityUsed {
                caster: "p1".to_string(),
                ability_id: "slash".to_string()
            },
            Event::HpChanged {
                unit_id: "e1".to_string(),
                hp: 60
            },
            Event::AbilityUsed {
                caster: "p2".to_string(),
                ability_id: "slash".to_string()
            },
        ]
    );
}

#[test]
fn test_timeout_also_checks_pincer() {
    let mut battle = battle_from_ascii("p1 e1 . p2");
    drag(&mut battle, "p2", &[(0, 2)]);
    while !battle.tick() {}
    let events = battle.drain_events();
    assert!(events.contains(&Event::PincerTriggered {
        enemy: "e1".to_string(),
        ally_a: "p1".to_string(),
        ally_b: "p2".to_string(),
    }));
}

proptest! {
    #[test]
    fn prop_row_pincer_found_anywhere(row in 0..BOARD_ROWS, col in 1..(BOARD_COLS - 1)) {
        let mut ascii = String::new();
        for r in 0..BOARD_ROWS {
            let line: Vec<&str> = (0..BOARD_COLS)
                .map(|c| match (r == row, c - col) {
                    (true, -1) => "pa",
                    (true, 0) => "e1",
                    (true, 1) => "pb",
                    _ => ".",
                })
                .collect();
            ascii.push_str(&line.join(" "));
            ascii.push('\n');
        }
        let (board, _) = load_from_ascii(&ascii).unwrap();
        prop_assert_eq!(find_pincers(&board), vec![pincer("e1", "pa", "pb")]);
    }
}
