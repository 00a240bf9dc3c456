use serde::{Deserialize, Serialize};

mod action;
mod battle;
mod board;
mod config;
mod constants;
mod error;
mod event;
mod gesture;
mod loader;
mod turn;
mod unit;

pub use action::*;
pub use battle::*;
pub use board::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use event::*;
pub use gesture::*;
pub use loader::*;
pub use turn::*;
pub use unit::*;

pub use asset_lib::{
    AbilityDefinition, AbilityEffect, AbilityID, AbilityKind, BossDefinition, Catalog,
    CharacterDefinition, CharacterID, EnemyDefinition, EquipmentDefinition, EquipmentID, Level,
    LevelDefinition, LevelStatsRow, LevelStatsTable, LoadError, TeamDefinition, TeamMember,
    TerrainDefinition,
};

pub type UnitID = String;
pub type Coord = i32;
pub type HitPoints = i32;
pub type Millis = u32;

/// 棋盤座標，(row, col) 從 0 開始，row 向下、col 向右
#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Pos {
    pub row: Coord,
    pub col: Coord,
}

impl Pos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Pos { row, col }
    }

    pub const fn offset(self, d_row: Coord, d_col: Coord) -> Self {
        Pos {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// 切比雪夫距離（八方向）
    pub fn chebyshev(self, other: Pos) -> Coord {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
