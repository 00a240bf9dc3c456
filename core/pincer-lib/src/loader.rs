//! loader.rs：
//! - 由外部載入好的定義（關卡、隊伍、目錄）組出棋盤；位置有問題的項目夾回或略過，不中斷載入。
//! - load_from_ascii：以 ASCII art 描述棋盤，主要給測試與模擬器使用。
use crate::*;
use std::collections::HashMap;
use tracing::{info, warn};

/// ASCII 棋盤中 `~` 代表的地形
pub const ASCII_LAVA: &str = "lava";
pub const ASCII_LAVA_DAMAGE: HitPoints = 10;

/// 從 ASCII 格式載入棋盤
///
/// ASCII 格式：每行用空格分隔的符號，左上角為 (0, 0)
/// - `.` = 空格
/// - `#` = 巨石
/// - `~` = 熔岩（ASCII_LAVA_DAMAGE 傷害）
/// - `p` 開頭 = 玩家，符號即為 ID
/// - `e` 開頭 = 敵人
/// - `B` 開頭 = 首領（2x2），第一次出現的位置為左上角，其餘相同符號忽略
/// - 其他符號只記錄為標記
///
/// 返回：(棋盤, 標記映射)，標記包含所有非 `.` 的符號
///
/// 例如：
/// ```text
/// . e1 .
/// p1 . p2
/// # ~ .
/// ```
pub fn load_from_ascii(ascii: &str) -> Result<(Board, HashMap<String, Vec<Pos>>), Error> {
    let func = "load_from_ascii";
    let malformed = |reason: &str| {
        Error::from(LoadError::Malformed {
            asset: "ascii".to_string(),
            format: "ascii",
            reason: reason.to_string(),
        })
    };

    let lines: Vec<&str> = ascii
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(malformed("棋盤為空"));
    }

    let catalog = Catalog::default();
    let mut board = Board::new();
    let mut markers: HashMap<String, Vec<Pos>> = HashMap::new();

    for (row, line) in lines.iter().enumerate() {
        for (col, cell) in line.split_whitespace().enumerate() {
            let (Ok(row), Ok(col)) = (Coord::try_from(row), Coord::try_from(col)) else {
                return Err(malformed("棋盤過大"));
            };
            let pos = Pos::new(row, col);
            if !is_in_bounds(pos) {
                return Err(Error::InvalidPosition { func, pos });
            }
            if cell == "." {
                continue;
            }
            let first_seen = !markers.contains_key(cell);
            markers.entry(cell.to_string()).or_default().push(pos);

            match cell {
                "#" => board.insert_terrain(
                    pos,
                    TerrainTile {
                        kind: BOULDER.to_string(),
                        damage: 0,
                    },
                )?,
                "~" => board.insert_terrain(
                    pos,
                    TerrainTile {
                        kind: ASCII_LAVA.to_string(),
                        damage: ASCII_LAVA_DAMAGE,
                    },
                )?,
                id if id.starts_with('p') => {
                    let member = TeamMember {
                        id: id.to_string(),
                        character: None,
                        level: 1,
                        equipment: Vec::new(),
                        row: None,
                        col: None,
                    };
                    board.insert_unit(Unit::player(&member, pos, &catalog))?;
                }
                id if id.starts_with('e') => {
                    board.insert_unit(Unit::enemy(&EnemyDefinition {
                        id: id.to_string(),
                        row: pos.row,
                        col: pos.col,
                        hp: asset_lib::DEFAULT_ENEMY_HP,
                        attack: 0,
                        defense: 0,
                        abilities: Vec::new(),
                        img: None,
                    }))?;
                }
                id if id.starts_with('B') && first_seen => {
                    board.insert_unit(Unit::boss(&BossDefinition {
                        id: id.to_string(),
                        name: None,
                        row: pos.row,
                        col: pos.col,
                        hp: asset_lib::DEFAULT_ENEMY_HP,
                        attack: 0,
                        defense: 0,
                        abilities: Vec::new(),
                        img: None,
                    }))?;
                }
                _ => {}
            }
        }
    }

    Ok((board, markers))
}

/// 依關卡與隊伍定義組出棋盤
///
/// 加入順序：地形、玩家（隊伍順序）、敵人（關卡順序）、首領。
/// 越界的位置夾回棋盤，與既有單位或巨石重疊的單位略過，都以 warn 記錄。
pub fn board_from_definitions(
    level: &LevelDefinition,
    team: &TeamDefinition,
    catalog: &Catalog,
) -> Board {
    let mut board = Board::new();

    for terrain in &level.terrain {
        let pos = Pos::new(terrain.row, terrain.col);
        let tile = TerrainTile {
            kind: terrain.kind.clone(),
            damage: terrain.damage,
        };
        if let Err(e) = board.insert_terrain(pos, tile) {
            warn!(error = %e, "terrain skipped");
        }
    }

    for (index, member) in team.team.iter().enumerate() {
        let default_col = Coord::try_from(index).map_or(Coord::MAX, |i| 1 + i);
        let pos = match (member.row, member.col) {
            (Some(row), Some(col)) => Pos::new(row, col),
            _ => Pos::new(PLAYER_START_ROW, default_col),
        };
        let unit = Unit::player(member, placed(&member.id, pos, 1, 1), catalog);
        insert_or_skip(&mut board, unit);
    }

    for def in &level.enemies {
        let mut unit = Unit::enemy(def);
        unit.pos = placed(&unit.id, unit.pos, unit.width, unit.height);
        insert_or_skip(&mut board, unit);
    }

    for def in &level.bosses {
        let mut unit = Unit::boss(def);
        unit.pos = placed(&unit.id, unit.pos, unit.width, unit.height);
        insert_or_skip(&mut board, unit);
    }

    info!(
        units = board.units.len(),
        terrain = board.terrain.len(),
        "board loaded"
    );
    board
}

/// 夾回棋盤內，位置有變動時記錄
fn placed(unit_id: &str, pos: Pos, width: Coord, height: Coord) -> Pos {
    let clamped = clamp_anchor(pos, width, height);
    if clamped != pos {
        warn!(unit_id, ?pos, ?clamped, "placement out of bounds, clamped");
    }
    clamped
}

fn insert_or_skip(board: &mut Board, unit: Unit) {
    let unit_id = unit.id.clone();
    if let Err(e) = board.insert_unit(unit) {
        warn!(unit_id = %unit_id, error = %e, "unit skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_ascii() {
        let ascii = r#"
            . e1 . . . .
            p1 . p2 . . .
            # ~ . B1 B1 .
            . . . B1 B1 .
        "#;
        let (board, markers) = load_from_ascii(ascii).unwrap();
        assert_eq!(board.unit_pos("e1"), Some(Pos::new(0, 1)));
        assert_eq!(board.unit_pos("p2"), Some(Pos::new(1, 2)));
        assert_eq!(board.unit_pos("B1"), Some(Pos::new(2, 3)));
        assert_eq!(board.unit("B1").unwrap().kind, UnitKind::Boss);
        assert!(board.is_boulder(Pos::new(2, 0)));
        assert_eq!(board.terrain_at(Pos::new(2, 1)).unwrap().damage, ASCII_LAVA_DAMAGE);
        assert_eq!(markers["B1"].len(), 4);
        // 依出現順序
        let order: Vec<_> = board.units.keys().cloned().collect();
        assert_eq!(order, vec!["e1", "p1", "p2", "B1"]);
    }

    #[test]
    fn test_load_from_ascii_too_wide() {
        let err = load_from_ascii(". . . . . . .").unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { .. }));
        assert!(load_from_ascii("   \n  ").is_err());
    }

    #[test]
    fn test_board_from_definitions() {
        let level: LevelDefinition = asset_lib::parse_toml(
            "level",
            r#"
            [[enemies]]
            id = "slime"
            row = 1
            col = 9

            [[enemies]]
            id = "blocked"
            row = 5
            col = 5

            [[bosses]]
            id = "golem"
            row = 7
            col = 5
            hp = 300

            [[terrain]]
            row = 5
            col = 5
            type = "boulder"
            "#,
        )
        .unwrap();
        let team: TeamDefinition = asset_lib::parse_toml(
            "team",
            r#"
            [[team]]
            id = "p1"

            [[team]]
            id = "p2"
            row = 3
            col = 3
            "#,
        )
        .unwrap();

        let board = board_from_definitions(&level, &team, &Catalog::default());
        assert_eq!(board.unit_pos("p1"), Some(Pos::new(PLAYER_START_ROW, 1)));
        assert_eq!(board.unit_pos("p2"), Some(Pos::new(3, 3)));
        assert_eq!(board.unit_pos("slime"), Some(Pos::new(1, 5)));
        assert_eq!(board.unit("blocked"), None);
        assert_eq!(board.unit_pos("golem"), Some(Pos::new(6, 4)));
        let order: Vec<_> = board.units.keys().cloned().collect();
        assert_eq!(order, vec!["p1", "p2", "slime", "golem"]);
    }
}
