//! ability.rs：
//! - 技能結算：依 AbilityEffect 分派，每種效果一個處理分支。
//! - 距離以單位左上角計算（切比雪夫距離），敵友以施放者陣營區分。
use crate::*;
use tracing::{debug, warn};

/// 以技能 ID 施放；找不到技能定義時不做任何事並回傳 MissingDefinition
pub fn use_ability_by_id(
    board: &mut Board,
    catalog: &Catalog,
    caster_id: &str,
    ability_id: &str,
    events: &mut Vec<Event>,
) -> Result<(), Error> {
    let func = "use_ability_by_id";

    let Some(ability) = catalog.ability(ability_id) else {
        warn!(caster = caster_id, ability_id, "ability not loaded, skipped");
        return Err(Error::MissingDefinition {
            func,
            kind: DefinitionKind::Ability,
            id: ability_id.to_string(),
        });
    };
    resolve_ability(board, catalog, caster_id, ability, events).map_err(|e| e.wrap(func))?;
    events.push(Event::AbilityUsed {
        caster: caster_id.to_string(),
        ability_id: ability_id.to_string(),
    });
    Ok(())
}

/// 攻擊技能的傷害：基礎傷害先加上攻擊力，再加一次基礎傷害；沒有基礎傷害時為 0
pub fn attack_damage(damage: Option<i32>, attack: i32) -> HitPoints {
    match damage {
        Some(damage) => damage + (damage + attack),
        None => 0,
    }
}

pub fn resolve_ability(
    board: &mut Board,
    catalog: &Catalog,
    caster_id: &str,
    ability: &AbilityDefinition,
    events: &mut Vec<Event>,
) -> Result<(), Error> {
    let func = "resolve_ability";

    let caster = board.unit(caster_id).ok_or_else(|| Error::UnitNotFound {
        func,
        unit_id: caster_id.to_string(),
    })?;
    let origin = caster.pos;
    let side = caster.side();
    let attack = compute_stats(caster, catalog).attack;

    match ability.effect() {
        AbilityEffect::Attack { range, damage } => {
            let amount = attack_damage(damage, attack);
            for target in targets(board, origin, range, |u| u.side() != side) {
                board.apply_damage(&target, amount, events);
            }
        }
        AbilityEffect::AreaAttack { range, damage } => {
            for target in targets(board, origin, range, |u| u.side() != side) {
                board.apply_damage(&target, damage, events);
            }
        }
        AbilityEffect::Heal { range, heal } => {
            for target in targets(board, origin, range, |u| u.side() == side) {
                board.apply_heal(&target, heal, events);
            }
        }
        AbilityEffect::ChainHeal { heal } => {
            for target in chain_closure(board, &[caster_id.to_string()], &WithinRange(1)) {
                board.apply_heal(&target, heal, events);
            }
        }
        AbilityEffect::Special | AbilityEffect::Unknown => {
            debug!(caster = caster_id, kind = %ability.kind, "ability has no effect");
        }
    }
    Ok(())
}

/// 範圍內符合條件的單位 ID，依加入順序
fn targets(
    board: &Board,
    origin: Pos,
    range: u32,
    filter: impl Fn(&Unit) -> bool,
) -> Vec<UnitID> {
    let range = Coord::try_from(range).unwrap_or(Coord::MAX);
    board
        .units
        .values()
        .filter(|u| filter(*u) && origin.chebyshev(u.pos) <= range)
        .map(|u| u.id.clone())
        .collect()
}
