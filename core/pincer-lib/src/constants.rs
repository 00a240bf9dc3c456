//! 遊戲常數定義

use crate::{Coord, Millis};

/// 棋盤列數（row）
pub const BOARD_ROWS: Coord = 8;

/// 棋盤行數（col）
pub const BOARD_COLS: Coord = 6;

/// 首領佔據的邊長（2x2）
pub const BOSS_SIZE: Coord = 2;

/// 玩家隊伍預設擺放的列，第 i 位成員放在 (PLAYER_START_ROW, 1 + i)
pub const PLAYER_START_ROW: Coord = BOARD_ROWS - 1;

/// 回合倒數時間
pub const TURN_DURATION_MS: Millis = 4000;

/// 倒數計時的間隔
pub const TICK_MS: Millis = 10;

/// 會阻擋移動與視線的地形
pub const BOULDER: &str = "boulder";

/// 等級屬性表查無資料時的預設值
pub const DEFAULT_BASE_HP: f64 = 100.0;
pub const DEFAULT_BASE_ATTACK: f64 = 10.0;
pub const DEFAULT_BASE_DEFENSE: f64 = 0.0;
