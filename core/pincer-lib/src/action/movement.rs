//! movement.rs：
//! - 拖曳中的逐次移動判定（MoveSession / advance）與放開時的最終確認（settle）。
//! - 每次輸入更新的處理順序：夾回棋盤 → 推擠 → 目的地佔據判定 → 接受後沿路扣地形傷害並更新位置。
//! - 單位在棋盤上的位置永遠是無衝突的格子，被擋下時位置不變。
use crate::*;
use tracing::{debug, warn};

/// 一次拖曳手勢的狀態
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSession {
    pub unit_id: UnitID,
    /// 手勢開始時的位置
    pub start: Pos,
    /// 最後一個被接受的無衝突位置
    pub last_safe: Pos,
    /// 上一次被擋下的目的地，避免同一格重複送出提示
    last_blocked: Option<Pos>,
}

impl MoveSession {
    pub fn new(unit_id: UnitID, start: Pos) -> Self {
        MoveSession {
            unit_id,
            start,
            last_safe: start,
            last_blocked: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// 目的地與目前位置相同
    Unchanged,
    Moved { from: Pos, to: Pos },
    /// 目的地有佔據者，位置維持在 last_safe
    Blocked { pos: Pos, occupant: Occupant },
}

/// 處理一次輸入位置更新
pub fn advance(
    board: &mut Board,
    memo: &mut PushMemo,
    rule: PushRule,
    session: &mut MoveSession,
    destination: Pos,
    events: &mut Vec<Event>,
) -> Result<StepOutcome, Error> {
    let func = "advance";

    let mover = board
        .unit(&session.unit_id)
        .ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: session.unit_id.clone(),
        })?;
    let (width, height) = (mover.width, mover.height);

    let clamped = clamp_anchor(destination, width, height);
    if clamped != destination {
        warn!(unit_id = %session.unit_id, ?destination, ?clamped, "destination out of bounds, clamped");
    }
    let destination = clamped;
    let prev = session.last_safe;
    if destination == prev {
        return Ok(StepOutcome::Unchanged);
    }

    let others: Vec<UnitID> = board
        .players()
        .filter(|u| u.id != session.unit_id)
        .map(|u| u.id.clone())
        .collect();
    for other in &others {
        resolve_push(
            board,
            memo,
            rule,
            &session.unit_id,
            other,
            prev,
            destination,
            events,
        )
        .map_err(|e| e.wrap(func))?;
    }

    if let Some((pos, occupant)) =
        board.footprint_conflict(destination, width, height, Some(session.unit_id.as_str()))
    {
        if session.last_blocked != Some(destination) {
            session.last_blocked = Some(destination);
            debug!(unit_id = %session.unit_id, ?pos, occupant = %occupant.kind(), "step blocked");
            events.push(Event::MovementBlocked {
                unit_id: session.unit_id.clone(),
                pos,
                occupant: occupant.kind(),
                occupant_id: occupant.unit_id().cloned(),
            });
        }
        return Ok(StepOutcome::Blocked { pos, occupant });
    }
    session.last_blocked = None;

    for tile in axis_path(prev, destination) {
        if let Some(damage) = board.terrain_at(tile).map(|t| t.damage) {
            board.apply_damage(&session.unit_id, damage, events);
        }
    }
    board
        .set_position(&session.unit_id, destination, events)
        .map_err(|e| e.wrap(func))?;
    session.last_safe = destination;
    debug!(unit_id = %session.unit_id, from = ?prev, to = ?destination, "step accepted");

    Ok(StepOutcome::Moved {
        from: prev,
        to: destination,
    })
}

/// 放開時再確認一次最終位置；有衝突就退回最後安全位置，回傳是否發生衝突
pub fn settle(
    board: &mut Board,
    session: &MoveSession,
    events: &mut Vec<Event>,
) -> Result<bool, Error> {
    let func = "settle";

    let mover = board
        .unit(&session.unit_id)
        .ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: session.unit_id.clone(),
        })?;
    let (width, height) = (mover.width, mover.height);
    let exclude = Some(session.unit_id.as_str());
    let Some((pos, occupant)) = board.footprint_conflict(mover.pos, width, height, exclude) else {
        return Ok(false);
    };

    // 先退回最後安全位置，那裡也被佔據時才退回手勢起點
    let fallback = [session.last_safe, session.start]
        .into_iter()
        .find(|tile| board.footprint_conflict(*tile, width, height, exclude).is_none());
    warn!(
        unit_id = %session.unit_id,
        ?pos,
        occupant = %occupant.kind(),
        ?fallback,
        "conflict on drop, reverting"
    );
    if let Some(tile) = fallback {
        board
            .set_position(&session.unit_id, tile, events)
            .map_err(|e| e.wrap(func))?;
    }
    Ok(true)
}

/// 時間到：退回最後一個安全位置
pub fn revert_to_safe(
    board: &mut Board,
    session: &MoveSession,
    events: &mut Vec<Event>,
) -> Result<(), Error> {
    board
        .set_position(&session.unit_id, session.last_safe, events)
        .map_err(|e| e.wrap("revert_to_safe"))
}
