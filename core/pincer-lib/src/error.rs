// 棋盤規則錯誤型別，攜帶 function name 與 context，支援來源錯誤巢狀
use crate::*;
use strum_macros::Display;
use thiserror::Error;

/// 查詢不到的定義種類
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum DefinitionKind {
    Ability,
    Character,
    Equipment,
}

/// 棋盤核心錯誤型別
///
/// 核心內沒有致命錯誤：呼叫端收到錯誤時，狀態保證未被修改。
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{func}`: 位置 {pos} 超出棋盤")]
    InvalidPosition { func: &'static str, pos: Pos },

    #[error("`{func}`: 找不到單位 {unit_id}")]
    UnitNotFound { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 單位 {unit_id} 已存在")]
    DuplicateUnit { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: {unit_id} 不是行動中的單位")]
    NotActiveUnit { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: {unit_id} 不能被拖曳")]
    NotMovable { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 規則設定 {field} 必須大於 0")]
    InvalidConfig {
        func: &'static str,
        field: &'static str,
    },

    #[error("`{func}`: 沒有行動中的單位")]
    NoActiveUnit { func: &'static str },

    #[error("`{func}`: {unit_id} 正在行動中")]
    TurnInProgress { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 回合已鎖定")]
    TurnLocked { func: &'static str },

    #[error("`{func}`: 位置 {pos} 已被 {occupant} 佔用")]
    PosOccupied {
        func: &'static str,
        pos: Pos,
        occupant: OccupantKind,
    },

    #[error("`{func}`: 找不到 {kind} 定義 {id}")]
    MissingDefinition {
        func: &'static str,
        kind: DefinitionKind,
        id: String,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("`{func}`: 包裝: {source}")]
    Wrap {
        func: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn wrap(self, func: &'static str) -> Self {
        Error::Wrap {
            func,
            source: Box::new(self),
        }
    }
}

pub fn root_error(err: &Error) -> &Error {
    let mut err = err;
    while let Error::Wrap { source, .. } = err {
        err = source.as_ref();
    }
    err
}
