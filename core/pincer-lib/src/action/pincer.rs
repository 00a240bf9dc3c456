//! pincer.rs：
//! - 夾擊判定：敵人（含首領）在同一列左右、或同一行上下各有一名玩家緊貼。
//! - 每個敵人只回報第一個符合的夾擊，先掃列（0..BOARD_ROWS）再掃行（0..BOARD_COLS）。
use crate::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pincer {
    pub enemy: UnitID,
    /// 左方或上方的玩家
    pub ally_a: UnitID,
    /// 右方或下方的玩家
    pub ally_b: UnitID,
}

pub fn find_pincers(board: &Board) -> Vec<Pincer> {
    board
        .enemies()
        .filter_map(|enemy| find_pincer(board, enemy))
        .collect()
}

fn find_pincer(board: &Board, enemy: &Unit) -> Option<Pincer> {
    let footprint = enemy.footprint();
    let player_at = |pos: Pos| {
        board
            .players()
            .find(|p| p.covers(pos))
            .map(|p| p.id.clone())
    };
    let pincer = |a: UnitID, b: UnitID| Pincer {
        enemy: enemy.id.clone(),
        ally_a: a,
        ally_b: b,
    };

    for row in 0..BOARD_ROWS {
        let cols = footprint.iter().filter(|p| p.row == row).map(|p| p.col);
        let (Some(min), Some(max)) = (cols.clone().min(), cols.max()) else {
            continue;
        };
        if let (Some(left), Some(right)) = (
            player_at(Pos::new(row, min - 1)),
            player_at(Pos::new(row, max + 1)),
        ) {
            return Some(pincer(left, right));
        }
    }
    for col in 0..BOARD_COLS {
        let rows = footprint.iter().filter(|p| p.col == col).map(|p| p.row);
        let (Some(min), Some(max)) = (rows.clone().min(), rows.max()) else {
            continue;
        };
        if let (Some(top), Some(bottom)) = (
            player_at(Pos::new(min - 1, col)),
            player_at(Pos::new(max + 1, col)),
        ) {
            return Some(pincer(top, bottom));
        }
    }
    None
}
