//! pincer-sim：讀入情境檔重播腳本，印出事件紀錄與最後的棋盤狀態。
//!
//! 用法：`pincer-sim scenarios/pincer.toml [--rules rules.toml]`
//! 記錄層級用 RUST_LOG 調整，預設 info。
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use pincer_lib::RulesConfig;
use scenario::{Scenario, run, summarize};
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pincer-sim", about = "Replay a pincer battle scenario")]
struct Args {
    /// 情境檔（TOML）
    scenario: PathBuf,

    /// 覆寫情境檔內的規則設定
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading scenario {}", args.scenario.display()))?;
    let scenario = Scenario::from_toml(&text)
        .with_context(|| format!("parsing scenario {}", args.scenario.display()))?;

    let rules = match &args.rules {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading rules {}", path.display()))?;
            Some(
                RulesConfig::from_toml(&text)
                    .with_context(|| format!("parsing rules {}", path.display()))?,
            )
        }
        None => None,
    };

    let (battle, events) = run(&scenario, rules);
    println!("{} events", events.len());

    let summary = toml::to_string_pretty(&summarize(&battle)).context("formatting summary")?;
    println!("{summary}");
    Ok(())
}
