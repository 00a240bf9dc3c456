// 資料載入錯誤型別
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{asset}: {format} 解析失敗: {reason}")]
    Malformed {
        asset: String,
        format: &'static str,
        reason: String,
    },

    #[error("等級欄位 `{key}` 不是合法數字")]
    InvalidLevelKey { key: String },
}
