//! 測試輔助：用 ASCII art 建立戰鬥與技能目錄
//!
//! 棋盤符號見 `pincer_lib::load_from_ascii`。
#![allow(dead_code)]

use pincer_lib::*;

pub fn battle_from_ascii(ascii: &str) -> Battle {
    battle_with(ascii, Catalog::default(), RulesConfig::default())
}

pub fn battle_with(ascii: &str, catalog: Catalog, config: RulesConfig) -> Battle {
    let (board, _) = load_from_ascii(ascii).expect("ascii board");
    Battle::new(board, catalog, config)
}

pub fn ability(kind: AbilityKind, range: u32, damage: Option<i32>, heal: Option<i32>) -> AbilityDefinition {
    AbilityDefinition {
        kind,
        range,
        damage,
        heal,
        ..Default::default()
    }
}

/// 給指定單位設定技能清單
pub fn grant(battle: &mut Battle, unit_id: &str, abilities: &[&str]) {
    let unit = battle.board.units.get_mut(unit_id).expect("unit exists");
    unit.abilities = abilities.iter().map(|s| s.to_string()).collect();
}

pub fn set_hp(battle: &mut Battle, unit_id: &str, hp: HitPoints) {
    battle.board.units.get_mut(unit_id).expect("unit exists").hp = hp;
}

pub fn hp(battle: &Battle, unit_id: &str) -> HitPoints {
    battle.board.unit(unit_id).expect("unit exists").hp
}

pub fn pos(battle: &Battle, unit_id: &str) -> Pos {
    battle.board.unit_pos(unit_id).expect("unit exists")
}

/// 拖曳：開始後依序移動到每一格，不放開
pub fn drag(battle: &mut Battle, unit_id: &str, path: &[(Coord, Coord)]) -> Vec<StepOutcome> {
    battle.begin_move(unit_id).expect("begin move");
    path.iter()
        .map(|&(row, col)| battle.move_to(unit_id, Pos::new(row, col)).expect("move"))
        .collect()
}
