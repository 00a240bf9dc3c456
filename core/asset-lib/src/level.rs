//! level.rs：
//! - 關卡定義（敵人、首領、地形）與等級屬性表。
//! - 欄位皆容許缺漏，缺漏時使用預設值。
use crate::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_ENEMY_HP: i32 = 100;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LevelDefinition {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub music: Option<String>,
    #[serde(default)]
    pub enemies: Vec<EnemyDefinition>,
    #[serde(default)]
    pub bosses: Vec<BossDefinition>,
    #[serde(default)]
    pub terrain: Vec<TerrainDefinition>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EnemyDefinition {
    pub id: DefinitionID,
    pub row: i32,
    pub col: i32,
    #[serde(default = "default_enemy_hp")]
    pub hp: i32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub abilities: Vec<AbilityID>,
    #[serde(default)]
    pub img: Option<String>,
}

/// 首領定義，佔 2x2 格
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BossDefinition {
    pub id: DefinitionID,
    #[serde(default)]
    pub name: Option<String>,
    pub row: i32,
    pub col: i32,
    #[serde(default = "default_enemy_hp")]
    pub hp: i32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub abilities: Vec<AbilityID>,
    #[serde(default)]
    pub img: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TerrainDefinition {
    pub row: i32,
    pub col: i32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub damage: i32,
}

/// 等級屬性表中的一列，欄位名稱沿用資料表標題
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct LevelStatsRow {
    #[serde(rename = "Health Min", default)]
    pub health_min: Option<f64>,
    #[serde(rename = "Attack Min", default)]
    pub attack_min: Option<f64>,
    #[serde(rename = "Defense Min", default)]
    pub defense_min: Option<f64>,
}

/// 等級 -> 屬性列
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct LevelStatsTable {
    #[serde(with = "level_key_map")]
    pub rows: BTreeMap<Level, LevelStatsRow>,
}

impl LevelStatsTable {
    pub fn get(&self, level: Level) -> Option<&LevelStatsRow> {
        self.rows.get(&level)
    }

    pub fn insert(&mut self, level: Level, row: LevelStatsRow) {
        self.rows.insert(level, row);
    }
}

fn default_enemy_hp() -> i32 {
    DEFAULT_ENEMY_HP
}

// 讓 BTreeMap<Level, _> 可以用 string key 序列化（TOML 的 key 只能是字串）
mod level_key_map {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(
        map: &BTreeMap<Level, LevelStatsRow>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let string_map: BTreeMap<String, &LevelStatsRow> =
            map.iter().map(|(k, v)| (k.to_string(), v)).collect();
        string_map.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Level, LevelStatsRow>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string_map: BTreeMap<String, LevelStatsRow> = BTreeMap::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(k, v)| match k.trim().parse() {
                Ok(level) => Ok((level, v)),
                Err(_) => Err(serde::de::Error::custom(LoadError::InvalidLevelKey { key: k })),
            })
            .collect()
    }
}
