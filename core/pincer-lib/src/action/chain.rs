//! chain.rs：
//! - 連鎖判定：以「相連」判定函式為參數的遞移閉包。
//! - LineOfSight：同列或同行且中間沒有任何佔據者（攻擊連鎖）。
//! - WithinRange：切比雪夫距離在範圍內，不需視線（連鎖治療）。
use crate::*;
use tracing::{info, warn};

/// 兩個單位是否直接相連
pub trait ChainLink {
    fn is_linked(&self, board: &Board, a: &Unit, b: &Unit) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineOfSight;

impl ChainLink for LineOfSight {
    fn is_linked(&self, board: &Board, a: &Unit, b: &Unit) -> bool {
        match tiles_between(a.pos, b.pos) {
            Some(tiles) => tiles.into_iter().all(|pos| board.occupant(pos, None).is_none()),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WithinRange(pub Coord);

impl ChainLink for WithinRange {
    fn is_linked(&self, _board: &Board, a: &Unit, b: &Unit) -> bool {
        a.pos.chebyshev(b.pos) <= self.0
    }
}

/// 從 seeds 出發找出所有相連的同陣營單位（含 seeds，依發現順序）
///
/// 不存在的 seed 直接略過。
pub fn chain_closure(board: &Board, seeds: &[UnitID], link: &impl ChainLink) -> Vec<UnitID> {
    let seeds: Vec<UnitID> = seeds
        .iter()
        .filter(|id| board.unit(id).is_some())
        .cloned()
        .collect();
    let Some(side) = seeds.first().and_then(|id| board.unit(id)).map(Unit::side) else {
        return Vec::new();
    };
    let candidates: Vec<UnitID> = board
        .units
        .values()
        .filter(|u| u.side() == side)
        .map(|u| u.id.clone())
        .collect();

    transitive_closure(&seeds, &candidates, |a, b| {
        match (board.unit(a), board.unit(b)) {
            (Some(a), Some(b)) => link.is_linked(board, a, b),
            _ => false,
        }
    })
}

/// 攻擊連鎖：與 seeds 直線相連的所有友軍各自施放第一個技能
///
/// 回傳參與連鎖的單位。
pub fn run_attack_chain(
    board: &mut Board,
    catalog: &Catalog,
    seeds: &[UnitID],
    target: &str,
    events: &mut Vec<Event>,
) -> Vec<UnitID> {
    let members = chain_closure(board, seeds, &LineOfSight);
    if members.is_empty() {
        return members;
    }
    info!(?seeds, ?members, target, "attack chain");
    events.push(Event::ChainTriggered {
        seeds: seeds.to_vec(),
        members: members.clone(),
        target: target.to_string(),
    });

    for member in &members {
        let Some(ability_id) = board.unit(member).and_then(Unit::first_ability).cloned() else {
            continue;
        };
        if let Err(e) = use_ability_by_id(board, catalog, member, &ability_id, events) {
            warn!(unit_id = %member, ability_id = %ability_id, error = %e, "chain member skipped");
        }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_line_of_sight_blocked_by_boulder() {
        let mut board = Board::new();
        player(&mut board, "a", 2, 0);
        player(&mut board, "b", 2, 4);
        player(&mut board, "c", 5, 0);
        board
            .insert_terrain(
                Pos::new(2, 2),
                TerrainTile {
                    kind: BOULDER.to_string(),
                    damage: 0,
                },
            )
            .unwrap();

        let chain = chain_closure(&board, &["a".to_string()], &LineOfSight);
        assert_eq!(chain, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_range_chain_is_transitive() {
        let mut board = Board::new();
        player(&mut board, "a", 0, 0);
        player(&mut board, "b", 1, 1);
        player(&mut board, "c", 2, 2);
        player(&mut board, "far", 7, 5);

        let chain = chain_closure(&board, &["a".to_string()], &WithinRange(1));
        assert_eq!(
            chain,
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_missing_seed_yields_empty() {
        let board = Board::new();
        assert!(chain_closure(&board, &["ghost".to_string()], &LineOfSight).is_empty());
    }
}
