//! roster.rs：隊伍、角色與裝備定義
use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TeamDefinition {
    #[serde(default)]
    pub team: Vec<TeamMember>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TeamMember {
    pub id: DefinitionID,
    #[serde(default)]
    pub character: Option<CharacterID>,
    #[serde(default = "default_level")]
    pub level: Level,
    #[serde(default)]
    pub equipment: Vec<EquipmentID>,
    // 未指定時由棋盤依隊伍順序擺放
    #[serde(default)]
    pub row: Option<i32>,
    #[serde(default)]
    pub col: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CharacterDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abilities: Vec<AbilityID>,
    #[serde(default)]
    pub health_multiplier: Option<f64>,
    #[serde(default)]
    pub attack_multiplier: Option<f64>,
    #[serde(default)]
    pub defense_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct EquipmentDefinition {
    #[serde(default)]
    pub attack: Option<i32>,
    #[serde(default)]
    pub defense: Option<i32>,
    #[serde(default)]
    pub hp: Option<i32>,
}

impl Default for CharacterDefinition {
    fn default() -> Self {
        CharacterDefinition {
            name: String::new(),
            abilities: Vec::new(),
            health_multiplier: None,
            attack_multiplier: None,
            defense_multiplier: None,
        }
    }
}

fn default_level() -> Level {
    1
}
