//! 輸入手勢：滑鼠拖曳與觸控統一成 start / move / end 三種
use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum InputGesture {
    Start { unit_id: UnitID, at: Pos },
    Move { at: Pos },
    /// 放開；有位置時先移動到該格再結算
    End { at: Option<Pos> },
}

/// 把相對於棋盤左上角的像素座標換算成格子
///
/// 結果可能在棋盤外，交給移動判定夾回；tile_size 不是正數或座標不是有限值時回傳 None。
pub fn tile_from_pixels(x: f64, y: f64, tile_size: f64) -> Option<Pos> {
    if tile_size.is_nan() || tile_size <= 0.0 || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Pos::new(
        (y / tile_size).floor() as Coord,
        (x / tile_size).floor() as Coord,
    ))
}
