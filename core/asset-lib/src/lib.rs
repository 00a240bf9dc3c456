//! asset-lib：
//! - 定義外部載入器提供的資料結構（關卡、隊伍、角色、技能、裝備、等級屬性表）。
//! - 僅負責資料格式與解析，不含任何棋盤或戰鬥邏輯。
mod ability;
mod catalog;
mod error;
mod level;
mod roster;

pub use ability::*;
pub use catalog::*;
pub use error::*;
pub use level::*;
pub use roster::*;

use serde::de::DeserializeOwned;

pub type AbilityID = String;
pub type CharacterID = String;
pub type EquipmentID = String;
pub type DefinitionID = String;
pub type Level = u32;

/// 解析 TOML 格式的資料，失敗時回傳 `LoadError::Malformed`
pub fn parse_toml<T: DeserializeOwned>(asset: &str, text: &str) -> Result<T, LoadError> {
    toml::from_str(text).map_err(|e| LoadError::Malformed {
        asset: asset.to_string(),
        format: "toml",
        reason: e.to_string(),
    })
}

/// 解析 JSON 格式的資料，失敗時回傳 `LoadError::Malformed`
pub fn parse_json<T: DeserializeOwned>(asset: &str, text: &str) -> Result<T, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::Malformed {
        asset: asset.to_string(),
        format: "json",
        reason: e.to_string(),
    })
}
