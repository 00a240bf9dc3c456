//! unit.rs：
//! - 定義單位（Unit）、單位種類與陣營、屬性（Stats）等資料結構，不含移動或戰鬥判定。
//! - 單位屬性衍生值（生命、攻擊、防禦）的計算集中於此（compute_stats）。
use crate::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, EnumString, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    Player,
    Enemy,
    Boss,
}

/// 陣營：敵人與首領同一陣營
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl UnitKind {
    pub fn side(self) -> Side {
        match self {
            UnitKind::Player => Side::Player,
            UnitKind::Enemy | UnitKind::Boss => Side::Enemy,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub hp: HitPoints,
    pub attack: i32,
    pub defense: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: UnitID,
    pub kind: UnitKind,
    /// 佔據範圍的左上角
    pub pos: Pos,
    pub width: Coord,
    pub height: Coord,
    pub hp: HitPoints,
    /// 載入時的屬性快照
    pub base_stats: Stats,
    pub level: Level,
    pub equipment: Vec<EquipmentID>,
    pub abilities: Vec<AbilityID>,
    pub character: Option<CharacterID>,
}

impl Unit {
    /// 由隊伍成員建立玩家單位，生命值取自 compute_stats
    pub fn player(member: &TeamMember, pos: Pos, catalog: &Catalog) -> Self {
        let abilities = match member.character.as_deref() {
            Some(id) => match catalog.character(id) {
                Some(character) => character.abilities.clone(),
                None => {
                    debug!(unit_id = %member.id, character = id, "character not loaded, no abilities");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let mut unit = Unit {
            id: member.id.clone(),
            kind: UnitKind::Player,
            pos,
            width: 1,
            height: 1,
            hp: 0,
            base_stats: Stats::default(),
            level: member.level,
            equipment: member.equipment.clone(),
            abilities,
            character: member.character.clone(),
        };
        let stats = compute_stats(&unit, catalog);
        unit.hp = stats.hp;
        unit.base_stats = stats;
        unit
    }

    pub fn enemy(def: &EnemyDefinition) -> Self {
        Unit {
            id: def.id.clone(),
            kind: UnitKind::Enemy,
            pos: Pos::new(def.row, def.col),
            width: 1,
            height: 1,
            hp: def.hp,
            base_stats: Stats {
                hp: def.hp,
                attack: def.attack,
                defense: def.defense,
            },
            level: 1,
            equipment: Vec::new(),
            abilities: def.abilities.clone(),
            character: None,
        }
    }

    pub fn boss(def: &BossDefinition) -> Self {
        Unit {
            id: def.id.clone(),
            kind: UnitKind::Boss,
            pos: Pos::new(def.row, def.col),
            width: BOSS_SIZE,
            height: BOSS_SIZE,
            hp: def.hp,
            base_stats: Stats {
                hp: def.hp,
                attack: def.attack,
                defense: def.defense,
            },
            level: 1,
            equipment: Vec::new(),
            abilities: def.abilities.clone(),
            character: None,
        }
    }

    pub fn side(&self) -> Side {
        self.kind.side()
    }

    pub fn is_player(&self) -> bool {
        self.kind == UnitKind::Player
    }

    /// 佔據的所有格子，依 row 再 col 排序
    pub fn footprint(&self) -> Vec<Pos> {
        footprint_at(self.pos, self.width, self.height)
    }

    /// 矩形包含判定，結果與 footprint().contains() 相同
    pub fn covers(&self, pos: Pos) -> bool {
        pos.row >= self.pos.row
            && pos.row < self.pos.row + self.height
            && pos.col >= self.pos.col
            && pos.col < self.pos.col + self.width
    }

    pub fn first_ability(&self) -> Option<&AbilityID> {
        self.abilities.first()
    }
}

pub fn footprint_at(anchor: Pos, width: Coord, height: Coord) -> Vec<Pos> {
    (0..height)
        .flat_map(|d_row| (0..width).map(move |d_col| anchor.offset(d_row, d_col)))
        .collect()
}

/// 計算單位目前的屬性
/// - 玩家：等級屬性表（缺列或缺欄位用預設值）× 角色倍率 + 裝備加成，最後無條件捨去
/// - 敵人與首領：沿用定義檔的數值
pub fn compute_stats(unit: &Unit, catalog: &Catalog) -> Stats {
    if !unit.is_player() {
        return unit.base_stats;
    }

    let row = catalog.level_stats.get(unit.level).copied().unwrap_or_default();
    let character = unit
        .character
        .as_deref()
        .and_then(|id| catalog.character(id));
    let multiplier = |pick: fn(&CharacterDefinition) -> Option<f64>| {
        character.and_then(pick).unwrap_or(1.0)
    };

    let mut hp = row.health_min.unwrap_or(DEFAULT_BASE_HP) * multiplier(|c| c.health_multiplier);
    let mut attack =
        row.attack_min.unwrap_or(DEFAULT_BASE_ATTACK) * multiplier(|c| c.attack_multiplier);
    let mut defense =
        row.defense_min.unwrap_or(DEFAULT_BASE_DEFENSE) * multiplier(|c| c.defense_multiplier);

    for id in &unit.equipment {
        match catalog.equipment(id) {
            Some(equipment) => {
                hp += f64::from(equipment.hp.unwrap_or(0));
                attack += f64::from(equipment.attack.unwrap_or(0));
                defense += f64::from(equipment.defense.unwrap_or(0));
            }
            None => debug!(unit_id = %unit.id, equipment = %id, "equipment not loaded, ignored"),
        }
    }

    Stats {
        hp: hp.floor() as HitPoints,
        attack: attack.floor() as i32,
        defense: defense.floor() as i32,
    }
}
