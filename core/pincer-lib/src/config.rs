//! 規則設定，可從 TOML 載入，未填欄位使用常數預設值
use crate::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// 推擠規則：移動者沿某方向踏上另一位玩家時，被推者退到哪一格
#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, Default, Display, EnumIter, EnumString, PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PushRule {
    /// 順著移動方向：被推者往移動者前進的方向再退一格。
    /// 例：(2,2) 走到 (2,3)，原本在 (2,3) 的玩家被推到 (2,4)。
    #[default]
    Displace,
    /// 逆著移動方向：被推者往移動者來的方向退一格，單格移動時等於兩者交換位置。
    /// 例：(2,2) 走到 (2,3)，原本在 (2,3) 的玩家被推到 (2,2)。
    Swap,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub turn_duration_ms: Millis,
    pub tick_ms: Millis,
    pub push_rule: PushRule,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            turn_duration_ms: TURN_DURATION_MS,
            tick_ms: TICK_MS,
            push_rule: PushRule::default(),
        }
    }
}

impl RulesConfig {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let config: RulesConfig = asset_lib::parse_toml("rules", text)?;
        config.validate()?;
        Ok(config)
    }

    /// 倒數時間與 tick 間隔為 0 時回合永遠不會因時間到而結束
    pub fn validate(&self) -> Result<(), Error> {
        let func = "RulesConfig::validate";

        if self.turn_duration_ms == 0 {
            return Err(Error::InvalidConfig {
                func,
                field: "turn_duration_ms",
            });
        }
        if self.tick_ms == 0 {
            return Err(Error::InvalidConfig {
                func,
                field: "tick_ms",
            });
        }
        Ok(())
    }
}
