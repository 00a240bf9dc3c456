//! push.rs：
//! - 移動者踏上另一位玩家所在格時，把對方推開一格。
//! - 每次拖曳手勢共用一份 PushMemo：同一組 (推者, 被推者) 只處理一次，
//!   被推到同一塊傷害地形上只扣一次血，離開再回來才會重新計算。
use crate::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct PushMemo {
    processed: HashSet<(UnitID, UnitID)>,
    last_damage_tile: HashMap<UnitID, Pos>,
}

impl PushMemo {
    /// 每次手勢開始時清空
    pub fn clear(&mut self) {
        self.processed.clear();
        self.last_damage_tile.clear();
    }

    pub fn is_processed(&self, pusher: &str, pushee: &str) -> bool {
        self.processed
            .contains(&(pusher.to_string(), pushee.to_string()))
    }

    pub fn last_damage_tile(&self, unit_id: &str) -> Option<Pos> {
        self.last_damage_tile.get(unit_id).copied()
    }
}

/// 被推者的目的地；移動不是單純的水平或垂直時回傳 None
pub fn push_destination(rule: PushRule, pushee: Pos, prev: Pos, new: Pos) -> Option<Pos> {
    let d_row = new.row - prev.row;
    let d_col = new.col - prev.col;
    if (d_row != 0) == (d_col != 0) {
        return None;
    }
    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    Some(match rule {
        PushRule::Displace => pushee.offset(step_row, step_col),
        PushRule::Swap => pushee.offset(-step_row, -step_col),
    })
}

/// 嘗試讓 mover 從 prev 走到 new 時推開 pushee，回傳是否真的推動
///
/// 只有 pushee 正好站在 new 上才會觸發；目的地越界、是巨石、
/// 被敵人或其他玩家佔據（移動者視為已站在 new）時整個推擠取消。
#[allow(clippy::too_many_arguments)]
pub fn resolve_push(
    board: &mut Board,
    memo: &mut PushMemo,
    rule: PushRule,
    mover_id: &str,
    pushee_id: &str,
    prev: Pos,
    new: Pos,
    events: &mut Vec<Event>,
) -> Result<bool, Error> {
    let func = "resolve_push";

    let pushee = board.unit(pushee_id).ok_or_else(|| Error::UnitNotFound {
        func,
        unit_id: pushee_id.to_string(),
    })?;
    if !pushee.is_player() || pushee.pos != new || mover_id == pushee_id {
        return Ok(false);
    }
    // 不論成功與否，同一手勢內只處理一次
    if !memo
        .processed
        .insert((mover_id.to_string(), pushee_id.to_string()))
    {
        return Ok(false);
    }
    let Some(destination) = push_destination(rule, pushee.pos, prev, new) else {
        return Ok(false);
    };

    if !is_in_bounds(destination) {
        debug!(pusher = mover_id, pushee = pushee_id, ?destination, "push out of bounds");
        return Ok(false);
    }
    let blocker = match board.occupant(destination, Some(pushee_id)) {
        // 移動者即將離開原本的格子
        Some(Occupant::Player(id)) if id == mover_id => None,
        other => other,
    };
    if let Some(blocker) = blocker {
        debug!(
            pusher = mover_id,
            pushee = pushee_id,
            ?destination,
            blocker = %blocker.kind(),
            "push blocked"
        );
        return Ok(false);
    }

    board.set_position(pushee_id, destination, events)?;
    events.push(Event::PushApplied {
        pusher: mover_id.to_string(),
        pushee: pushee_id.to_string(),
        destination,
    });
    debug!(pusher = mover_id, pushee = pushee_id, ?destination, "push applied");

    match board.terrain_at(destination).map(|t| t.damage) {
        Some(damage) => {
            if memo.last_damage_tile(pushee_id) != Some(destination) {
                memo.last_damage_tile
                    .insert(pushee_id.to_string(), destination);
                board.apply_damage(pushee_id, damage, events);
            }
        }
        None => {
            memo.last_damage_tile.remove(pushee_id);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_destination_rules() {
        let pushee = Pos::new(2, 3);
        let prev = Pos::new(2, 2);
        assert_eq!(
            push_destination(PushRule::Displace, pushee, prev, pushee),
            Some(Pos::new(2, 4))
        );
        assert_eq!(
            push_destination(PushRule::Swap, pushee, prev, pushee),
            Some(Pos::new(2, 2))
        );
        // 斜向不推
        assert_eq!(
            push_destination(PushRule::Displace, Pos::new(3, 3), Pos::new(2, 2), Pos::new(3, 3)),
            None
        );
        // 長距離拖曳只看方向
        assert_eq!(
            push_destination(PushRule::Displace, Pos::new(5, 1), Pos::new(1, 1), Pos::new(5, 1)),
            Some(Pos::new(6, 1))
        );
    }
}
