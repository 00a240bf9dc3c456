//! 連鎖判定測試

use pincer_lib::*;
use proptest::prelude::*;

fn player(board: &mut Board, id: &str, row: Coord, col: Coord) {
    let member = TeamMember {
        id: id.to_string(),
        character: None,
        level: 1,
        equipment: Vec::new(),
        row: None,
        col: None,
    };
    board
        .insert_unit(Unit::player(&member, Pos::new(row, col), &Catalog::default()))
        .unwrap();
}

fn ids(names: &[&str]) -> Vec<UnitID> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_line_chain_follows_corners() {
    let (board, _) = load_from_ascii(
        r#"
        p1 . . p2
        . . . .
        p4 . . p3
        . # . .
        p5 . . .
        "#,
    )
    .unwrap();

    // p1 -> p2 -> p3，p1 -> p4 -> p5；p1 與 p5 之間隔著 p4
    let chain = chain_closure(&board, &ids(&["p1"]), &LineOfSight);
    assert_eq!(chain, ids(&["p1", "p2", "p4", "p3", "p5"]));
}

#[test]
fn test_line_chain_blocked_by_unit() {
    let (board, _) = load_from_ascii("p1 e1 p2").unwrap();
    assert_eq!(
        chain_closure(&board, &ids(&["p1"]), &LineOfSight),
        ids(&["p1"])
    );
}

#[test]
fn test_chain_ignores_other_side() {
    let (board, _) = load_from_ascii("p1 e1\n. e2").unwrap();
    assert_eq!(
        chain_closure(&board, &ids(&["e1"]), &WithinRange(1)),
        ids(&["e1", "e2"])
    );
}

proptest! {
    #[test]
    fn prop_clear_line_links_both_ways(
        row in 0..BOARD_ROWS,
        a in 0..BOARD_COLS,
        b in 0..BOARD_COLS,
    ) {
        prop_assume!(a != b);
        let mut board = Board::new();
        player(&mut board, "pa", row, a);
        player(&mut board, "pb", row, b);

        let from_a = chain_closure(&board, &ids(&["pa"]), &LineOfSight);
        let from_b = chain_closure(&board, &ids(&["pb"]), &LineOfSight);
        prop_assert_eq!(from_a, ids(&["pa", "pb"]));
        prop_assert_eq!(from_b, ids(&["pb", "pa"]));
    }

    #[test]
    fn prop_blocked_line_never_links(
        col in 0..BOARD_COLS,
        a in 0..BOARD_ROWS,
        b in 0..BOARD_ROWS,
        boulder_in_middle in any::<bool>(),
    ) {
        let (top, bottom) = (a.min(b), a.max(b));
        prop_assume!(bottom - top >= 2);
        let mut board = Board::new();
        player(&mut board, "pa", top, col);
        player(&mut board, "pb", bottom, col);
        let block = Pos::new(top + 1, col);
        if boulder_in_middle {
            board
                .insert_terrain(block, TerrainTile { kind: BOULDER.to_string(), damage: 0 })
                .unwrap();
        } else {
            board
                .insert_unit(Unit::enemy(&EnemyDefinition {
                    id: "wall".to_string(),
                    row: block.row,
                    col: block.col,
                    hp: 100,
                    attack: 0,
                    defense: 0,
                    abilities: Vec::new(),
                    img: None,
                }))
                .unwrap();
        }

        prop_assert_eq!(chain_closure(&board, &ids(&["pa"]), &LineOfSight), ids(&["pa"]));
        prop_assert_eq!(chain_closure(&board, &ids(&["pb"]), &LineOfSight), ids(&["pb"]));
    }

    #[test]
    fn prop_range_chain_is_transitive(len in 2..=BOARD_COLS, start_row in 0..(BOARD_ROWS - BOARD_COLS + 1)) {
        // 斜線排列：相鄰兩人距離 1，頭尾距離 len - 1
        let mut board = Board::new();
        let names: Vec<String> = (0..len).map(|i| format!("p{i}")).collect();
        for (i, name) in names.iter().enumerate() {
            let i = i as Coord;
            player(&mut board, name, start_row + i, i);
        }
        let chain = chain_closure(&board, &names[..1], &WithinRange(1));
        prop_assert_eq!(chain, names);
    }
}
