//! action/mod.rs：
//! - 作為 action 子模組的入口，統一 re-export movement、push、chain、pincer、ability、algo 等子模組。
//! - 不放具體邏輯或資料結構實作。
mod ability;
mod algo;
mod chain;
mod movement;
mod pincer;
mod push;

pub use ability::*;
pub use algo::*;
pub use chain::*;
pub use movement::*;
pub use pincer::*;
pub use push::*;
