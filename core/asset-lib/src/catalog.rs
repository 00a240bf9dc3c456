//! catalog.rs：
//! - 已載入定義的集合（角色、技能、裝備、等級屬性表）。
//! - 個別資料格式錯誤時只略過該筆並記錄，已載入的資料保持不變。
use crate::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Catalog {
    #[serde(default)]
    pub characters: BTreeMap<CharacterID, CharacterDefinition>,
    #[serde(default)]
    pub abilities: BTreeMap<AbilityID, AbilityDefinition>,
    #[serde(default)]
    pub equipment: BTreeMap<EquipmentID, EquipmentDefinition>,
    #[serde(default)]
    pub level_stats: LevelStatsTable,
}

impl Catalog {
    pub fn character(&self, id: &str) -> Option<&CharacterDefinition> {
        self.characters.get(id)
    }

    pub fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    pub fn equipment(&self, id: &str) -> Option<&EquipmentDefinition> {
        self.equipment.get(id)
    }

    pub fn load_character_toml(&mut self, id: &str, text: &str) -> Result<(), LoadError> {
        load_into(&mut self.characters, id, text)
    }

    pub fn load_ability_toml(&mut self, id: &str, text: &str) -> Result<(), LoadError> {
        load_into(&mut self.abilities, id, text)
    }

    pub fn load_equipment_toml(&mut self, id: &str, text: &str) -> Result<(), LoadError> {
        load_into(&mut self.equipment, id, text)
    }

    /// 載入等級屬性表，新的列會覆蓋同等級的舊列
    pub fn load_level_stats_toml(&mut self, text: &str) -> Result<(), LoadError> {
        let table: LevelStatsTable = parse_toml("level_stats", text).inspect_err(|err| {
            warn!(%err, "level stats table skipped");
        })?;
        for (level, row) in table.rows {
            self.level_stats.insert(level, row);
        }
        Ok(())
    }

    /// 角色引用但尚未載入的技能
    pub fn missing_abilities(&self) -> BTreeSet<AbilityID> {
        self.characters
            .values()
            .flat_map(|c| c.abilities.iter())
            .filter(|id| !self.abilities.contains_key(*id))
            .cloned()
            .collect()
    }
}

fn load_into<T: DeserializeOwned>(
    map: &mut BTreeMap<String, T>,
    id: &str,
    text: &str,
) -> Result<(), LoadError> {
    match parse_toml::<T>(id, text) {
        Ok(value) => {
            debug!(asset = id, "definition loaded");
            map.insert(id.to_string(), value);
            Ok(())
        }
        Err(err) => {
            warn!(asset = id, %err, "definition skipped");
            Err(err)
        }
    }
}
