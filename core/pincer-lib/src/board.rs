//! board.rs：
//! - 棋盤聚合（Board）：單位位置與佔據範圍、地形。
//! - 回答佔據與邊界查詢；生命值增減也經由這裡，以便統一送出事件。
use crate::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TerrainTile {
    pub kind: String,
    pub damage: HitPoints,
}

impl TerrainTile {
    pub fn is_boulder(&self) -> bool {
        self.kind == BOULDER
    }
}

/// 佔據某格的東西
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    Enemy(UnitID),
    Boss(UnitID),
    Player(UnitID),
    Boulder,
}

#[derive(Debug, Serialize, Clone, Copy, Display, EnumIter, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OccupantKind {
    Enemy,
    Boss,
    Player,
    Boulder,
}

impl Occupant {
    pub fn kind(&self) -> OccupantKind {
        match self {
            Occupant::Enemy(_) => OccupantKind::Enemy,
            Occupant::Boss(_) => OccupantKind::Boss,
            Occupant::Player(_) => OccupantKind::Player,
            Occupant::Boulder => OccupantKind::Boulder,
        }
    }

    pub fn unit_id(&self) -> Option<&UnitID> {
        match self {
            Occupant::Enemy(id) | Occupant::Boss(id) | Occupant::Player(id) => Some(id),
            Occupant::Boulder => None,
        }
    }
}

/// 單位依加入順序保存，所有「找第一個」的掃描都依此順序
#[derive(Debug, Default, Clone)]
pub struct Board {
    pub units: IndexMap<UnitID, Unit>,
    pub terrain: HashMap<Pos, TerrainTile>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入單位：ID 不可重複、佔據範圍必須在棋盤內且不可與其他單位或巨石重疊
    pub fn insert_unit(&mut self, unit: Unit) -> Result<(), Error> {
        let func = "Board::insert_unit";

        if self.units.contains_key(&unit.id) {
            return Err(Error::DuplicateUnit {
                func,
                unit_id: unit.id,
            });
        }
        if !footprint_in_bounds(unit.pos, unit.width, unit.height) {
            return Err(Error::InvalidPosition {
                func,
                pos: unit.pos,
            });
        }
        for pos in unit.footprint() {
            if let Some(occupant) = self.occupant(pos, None) {
                return Err(Error::PosOccupied {
                    func,
                    pos,
                    occupant: occupant.kind(),
                });
            }
        }
        self.units.insert(unit.id.clone(), unit);
        Ok(())
    }

    pub fn insert_terrain(&mut self, pos: Pos, tile: TerrainTile) -> Result<(), Error> {
        if !is_in_bounds(pos) {
            return Err(Error::InvalidPosition {
                func: "Board::insert_terrain",
                pos,
            });
        }
        self.terrain.insert(pos, tile);
        Ok(())
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.get(unit_id)
    }

    pub fn unit_pos(&self, unit_id: &str) -> Option<Pos> {
        self.units.get(unit_id).map(|u| u.pos)
    }

    pub fn players(&self) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(|u| u.kind == UnitKind::Player)
    }

    /// 敵人與首領
    pub fn enemies(&self) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(|u| u.side() == Side::Enemy)
    }

    pub fn terrain_at(&self, pos: Pos) -> Option<&TerrainTile> {
        self.terrain.get(&pos)
    }

    pub fn is_boulder(&self, pos: Pos) -> bool {
        self.terrain_at(pos).is_some_and(TerrainTile::is_boulder)
    }

    /// 查詢某格的佔據者，依序檢查敵人/首領、玩家、巨石
    pub fn occupant(&self, pos: Pos, exclude: Option<&str>) -> Option<Occupant> {
        let excluded = |unit: &Unit| exclude.is_some_and(|id| id == unit.id);

        for unit in self.enemies().filter(|u| !excluded(u)) {
            match unit.kind {
                // 首領用矩形判定
                UnitKind::Boss if unit.covers(pos) => return Some(Occupant::Boss(unit.id.clone())),
                UnitKind::Enemy if unit.footprint().contains(&pos) => {
                    return Some(Occupant::Enemy(unit.id.clone()));
                }
                _ => {}
            }
        }
        for unit in self.players().filter(|u| !excluded(u)) {
            if unit.footprint().contains(&pos) {
                return Some(Occupant::Player(unit.id.clone()));
            }
        }
        if self.is_boulder(pos) {
            return Some(Occupant::Boulder);
        }
        None
    }

    /// 以 anchor 為左上角放置 width x height 的單位時，第一個衝突的格子與佔據者
    pub fn footprint_conflict(
        &self,
        anchor: Pos,
        width: Coord,
        height: Coord,
        exclude: Option<&str>,
    ) -> Option<(Pos, Occupant)> {
        footprint_at(anchor, width, height)
            .into_iter()
            .find_map(|pos| self.occupant(pos, exclude).map(|o| (pos, o)))
    }

    /// 直接設定位置（僅檢查邊界），呼叫端負責衝突判定
    pub fn set_position(
        &mut self,
        unit_id: &str,
        pos: Pos,
        events: &mut Vec<Event>,
    ) -> Result<(), Error> {
        let func = "Board::set_position";

        let unit = self
            .units
            .get_mut(unit_id)
            .ok_or_else(|| Error::UnitNotFound {
                func,
                unit_id: unit_id.to_string(),
            })?;
        if !footprint_in_bounds(pos, unit.width, unit.height) {
            return Err(Error::InvalidPosition { func, pos });
        }
        if unit.pos != pos {
            unit.pos = pos;
            events.push(Event::PositionChanged {
                unit_id: unit.id.clone(),
                pos,
            });
        }
        Ok(())
    }

    /// 扣血，最低為 0；回傳扣血後的生命值
    pub fn apply_damage(
        &mut self,
        unit_id: &str,
        amount: HitPoints,
        events: &mut Vec<Event>,
    ) -> Option<HitPoints> {
        self.change_hp(unit_id, |hp| (hp - amount).max(0), events)
    }

    /// 補血，沒有上限
    pub fn apply_heal(
        &mut self,
        unit_id: &str,
        amount: HitPoints,
        events: &mut Vec<Event>,
    ) -> Option<HitPoints> {
        self.change_hp(unit_id, |hp| hp + amount, events)
    }

    fn change_hp(
        &mut self,
        unit_id: &str,
        f: impl FnOnce(HitPoints) -> HitPoints,
        events: &mut Vec<Event>,
    ) -> Option<HitPoints> {
        let unit = self.units.get_mut(unit_id)?;
        let hp = f(unit.hp);
        if hp != unit.hp {
            unit.hp = hp;
            events.push(Event::HpChanged {
                unit_id: unit.id.clone(),
                hp,
            });
        }
        Some(hp)
    }
}

pub fn is_in_bounds(pos: Pos) -> bool {
    (0..BOARD_ROWS).contains(&pos.row) && (0..BOARD_COLS).contains(&pos.col)
}

/// width x height 的佔據範圍是否整個在棋盤內；不做會溢位的加法
pub fn footprint_in_bounds(anchor: Pos, width: Coord, height: Coord) -> bool {
    is_in_bounds(anchor)
        && (1..=BOARD_ROWS - anchor.row).contains(&height)
        && (1..=BOARD_COLS - anchor.col).contains(&width)
}

/// 把座標夾回棋盤內
pub fn clamp(pos: Pos) -> Pos {
    clamp_anchor(pos, 1, 1)
}

/// 把 width x height 的左上角夾回棋盤內，使整個佔據範圍都在棋盤上
pub fn clamp_anchor(pos: Pos, width: Coord, height: Coord) -> Pos {
    Pos {
        row: pos.row.clamp(0, BOARD_ROWS - height),
        col: pos.col.clamp(0, BOARD_COLS - width),
    }
}
