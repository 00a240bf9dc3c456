//! scenario.rs：
//! - 模擬情境檔（TOML）：規則、關卡、隊伍、定義目錄與腳本。
//! - 依序重播腳本並記錄所有事件；單一步驟失敗只記錄，不中斷重播。
use asset_lib::{
    AbilityDefinition, AbilityID, BossDefinition, Catalog, CharacterDefinition, CharacterID,
    EquipmentDefinition, EquipmentID, LevelDefinition, LevelStatsTable, LoadError, TeamDefinition,
    TeamMember,
};
use pincer_lib::{
    Battle, Coord, Event, InputGesture, Pos, RulesConfig, TurnState, UnitID, UnitKind,
    tile_from_pixels,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Scenario {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub level: LevelDefinition,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub characters: BTreeMap<CharacterID, CharacterDefinition>,
    #[serde(default)]
    pub abilities: BTreeMap<AbilityID, AbilityDefinition>,
    #[serde(default)]
    pub equipment: BTreeMap<EquipmentID, EquipmentDefinition>,
    #[serde(default)]
    pub level_stats: LevelStatsTable,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

/// 腳本的一步
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// 開始拖曳，未指定位置時從單位目前位置開始
    Start {
        unit: UnitID,
        row: Option<Coord>,
        col: Option<Coord>,
    },
    Move {
        row: Coord,
        col: Coord,
    },
    /// 以像素座標移動
    MovePixels {
        x: f64,
        y: f64,
        tile_size: f64,
    },
    End {
        row: Option<Coord>,
        col: Option<Coord>,
    },
    Tick {
        #[serde(default = "default_tick_count")]
        count: u32,
    },
    Pause,
    Resume,
    Ability {
        caster: UnitID,
        ability: AbilityID,
    },
    NextRound,
    SpawnBoss(BossDefinition),
}

fn default_tick_count() -> u32 {
    1
}

impl Scenario {
    pub fn from_toml(text: &str) -> Result<Self, pincer_lib::Error> {
        let scenario: Scenario = asset_lib::parse_toml("scenario", text)?;
        scenario.rules.validate()?;
        Ok(scenario)
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            characters: self.characters.clone(),
            abilities: self.abilities.clone(),
            equipment: self.equipment.clone(),
            level_stats: self.level_stats.clone(),
        }
    }

    /// 建立戰鬥；rules 有值時取代情境檔內的規則
    pub fn battle(&self, rules: Option<RulesConfig>) -> Battle {
        let catalog = self.catalog();
        for id in catalog.missing_abilities() {
            warn!(ability_id = %id, "ability referenced but not defined");
        }
        let team = TeamDefinition {
            team: self.team.clone(),
        };
        Battle::from_definitions(
            &self.level,
            &team,
            catalog,
            rules.unwrap_or_else(|| self.rules.clone()),
        )
    }
}

/// 重播腳本，回傳最後的戰鬥狀態與所有事件
pub fn run(scenario: &Scenario, rules: Option<RulesConfig>) -> (Battle, Vec<Event>) {
    let mut battle = scenario.battle(rules);
    let mut transcript = Vec::new();

    for (index, step) in scenario.script.iter().enumerate() {
        if let Err(e) = apply(&mut battle, step) {
            warn!(step = index, ?step, error = %e, "step failed");
        }
        for event in battle.drain_events() {
            info!(step = index, ?event, "event");
            transcript.push(event);
        }
    }
    (battle, transcript)
}

fn apply(battle: &mut Battle, step: &ScriptStep) -> Result<(), pincer_lib::Error> {
    match step {
        ScriptStep::Start { unit, row, col } => {
            let current = battle.board.unit_pos(unit).unwrap_or_default();
            let at = Pos::new(row.unwrap_or(current.row), col.unwrap_or(current.col));
            battle.handle_gesture(InputGesture::Start {
                unit_id: unit.clone(),
                at,
            })
        }
        ScriptStep::Move { row, col } => battle.handle_gesture(InputGesture::Move {
            at: Pos::new(*row, *col),
        }),
        ScriptStep::MovePixels { x, y, tile_size } => {
            match tile_from_pixels(*x, *y, *tile_size) {
                Some(at) => battle.handle_gesture(InputGesture::Move { at }),
                None => {
                    warn!(x, y, tile_size, "pixel position ignored");
                    Ok(())
                }
            }
        }
        ScriptStep::End { row, col } => {
            let at = match (row, col) {
                (Some(row), Some(col)) => Some(Pos::new(*row, *col)),
                _ => None,
            };
            battle.handle_gesture(InputGesture::End { at })
        }
        ScriptStep::Tick { count } => {
            for _ in 0..*count {
                if battle.tick() {
                    break;
                }
            }
            Ok(())
        }
        ScriptStep::Pause => {
            battle.pause();
            Ok(())
        }
        ScriptStep::Resume => {
            battle.resume();
            Ok(())
        }
        ScriptStep::Ability { caster, ability } => battle.use_ability(caster, ability),
        ScriptStep::NextRound => battle.next_round(),
        ScriptStep::SpawnBoss(def) => battle.spawn_boss(def),
    }
}

#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub id: UnitID,
    pub kind: UnitKind,
    pub row: Coord,
    pub col: Coord,
    pub hp: i32,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub turn: TurnState,
    pub units: Vec<UnitSummary>,
}

pub fn summarize(battle: &Battle) -> Summary {
    Summary {
        turn: battle.turn_state(),
        units: battle
            .board
            .units
            .values()
            .map(|u| UnitSummary {
                id: u.id.clone(),
                kind: u.kind,
                row: u.pos.row,
                col: u.pos.col,
                hp: u.hp,
            })
            .collect(),
    }
}
