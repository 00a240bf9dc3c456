//! 核心對表現層送出的事件
use crate::*;
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// 回合結束原因
#[derive(Debug, Serialize, Clone, Copy, Display, EnumString, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnEndReason {
    Timeout,
    ManualDrop,
    Conflict,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    PositionChanged {
        unit_id: UnitID,
        pos: Pos,
    },
    HpChanged {
        unit_id: UnitID,
        hp: HitPoints,
    },
    PushApplied {
        pusher: UnitID,
        pushee: UnitID,
        destination: Pos,
    },
    /// 移動被擋下，提示阻擋者種類與 ID（地形沒有 ID）
    MovementBlocked {
        unit_id: UnitID,
        pos: Pos,
        occupant: OccupantKind,
        occupant_id: Option<UnitID>,
    },
    AbilityUsed {
        caster: UnitID,
        ability_id: AbilityID,
    },
    ChainTriggered {
        seeds: Vec<UnitID>,
        members: Vec<UnitID>,
        target: UnitID,
    },
    PincerTriggered {
        enemy: UnitID,
        ally_a: UnitID,
        ally_b: UnitID,
    },
    TurnEnded {
        reason: TurnEndReason,
    },
    TurnReset,
}
