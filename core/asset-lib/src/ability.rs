//! ability.rs：
//! - 技能定義（AbilityDefinition）與其效果分類（AbilityEffect）。
//! - 效果的實際套用由棋盤核心處理，本檔只負責把資料整理成封閉的列舉。
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// 技能種類，對應資料中的 `type` 欄位；無法辨識的種類一律視為 `Unknown`
#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, Default, Display, EnumIter, EnumString, PartialEq, Eq,
)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "snake_case")]
pub enum AbilityKind {
    Attack,
    AreaAttack,
    Heal,
    ChainHeal,
    Special,
    #[default]
    Unknown,
}

impl From<String> for AbilityKind {
    fn from(value: String) -> Self {
        AbilityKind::from_str(&value).unwrap_or(AbilityKind::Unknown)
    }
}

impl From<AbilityKind> for String {
    fn from(kind: AbilityKind) -> Self {
        kind.to_string()
    }
}

/// 技能資料結構
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AbilityDefinition {
    #[serde(rename = "type", default)]
    pub kind: AbilityKind,
    #[serde(default = "default_range")]
    pub range: u32,
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default)]
    pub heal: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 技能效果，每個種類各自攜帶需要的數值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityEffect {
    /// 單體攻擊：範圍內所有敵人，傷害含施放者攻擊力
    Attack { range: u32, damage: Option<i32> },
    /// 範圍攻擊：固定傷害，不加攻擊力
    AreaAttack { range: u32, damage: i32 },
    Heal { range: u32, heal: i32 },
    /// 連鎖治療：從施放者沿相鄰友軍擴散
    ChainHeal { heal: i32 },
    Special,
    Unknown,
}

impl AbilityDefinition {
    pub fn effect(&self) -> AbilityEffect {
        match self.kind {
            AbilityKind::Attack => AbilityEffect::Attack {
                range: self.range,
                damage: self.damage,
            },
            AbilityKind::AreaAttack => AbilityEffect::AreaAttack {
                range: self.range,
                damage: self.damage.unwrap_or(0),
            },
            AbilityKind::Heal => AbilityEffect::Heal {
                range: self.range,
                heal: self.heal.unwrap_or(0),
            },
            AbilityKind::ChainHeal => AbilityEffect::ChainHeal {
                heal: self.heal.unwrap_or(0),
            },
            AbilityKind::Special => AbilityEffect::Special,
            AbilityKind::Unknown => AbilityEffect::Unknown,
        }
    }
}

impl Default for AbilityDefinition {
    fn default() -> Self {
        AbilityDefinition {
            kind: AbilityKind::Unknown,
            range: default_range(),
            damage: None,
            heal: None,
            name: None,
            description: None,
        }
    }
}

fn default_range() -> u32 {
    1
}
