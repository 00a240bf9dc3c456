//! 本檔案僅收錄「有名且有固定公式」的演算法。
//! 例如：遞移閉包、格線路徑展開等。
//! 若為專案自訂、尚未標準化或僅用於單一場景的邏輯，請勿放於此處。
use crate::*;
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// 遞移閉包（固定點可達性）
///
/// 從 seeds 出發，反覆把與「已到達節點」相連的候選節點加入，直到沒有新節點為止。
/// - 以 visited 集合保證每個節點只加入一次，相互連結不會造成循環
/// - 迭代次數上限為候選數量
/// - 回傳順序為發現順序，seeds 在最前
pub fn transitive_closure<T, F>(seeds: &[T], candidates: &[T], is_linked: F) -> Vec<T>
where
    T: Clone + Eq + Hash,
    F: Fn(&T, &T) -> bool,
{
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    for seed in seeds {
        if visited.insert(seed.clone()) {
            order.push(seed.clone());
            queue.push_back(seed.clone());
        }
    }

    while let Some(current) = queue.pop_front() {
        for candidate in candidates {
            if visited.contains(candidate) || !is_linked(&current, candidate) {
                continue;
            }
            visited.insert(candidate.clone());
            order.push(candidate.clone());
            queue.push_back(candidate.clone());
        }
    }

    order
}

/// 把 from -> to 展開成一連串上下左右的單格移動（不含起點，含終點）
///
/// 每一步走剩餘距離較大的軸，距離相同時先走 row。
pub fn axis_path(from: Pos, to: Pos) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut current = from;
    while current != to {
        let d_row = to.row - current.row;
        let d_col = to.col - current.col;
        current = if d_row.abs() >= d_col.abs() {
            current.offset(d_row.signum(), 0)
        } else {
            current.offset(0, d_col.signum())
        };
        path.push(current);
    }
    path
}

/// 同一列或同一行兩點之間（不含兩端）的格子；不在同一直線時回傳 None
pub fn tiles_between(a: Pos, b: Pos) -> Option<Vec<Pos>> {
    if a.row == b.row {
        let (lo, hi) = (a.col.min(b.col), a.col.max(b.col));
        Some((lo + 1..hi).map(|col| Pos::new(a.row, col)).collect())
    } else if a.col == b.col {
        let (lo, hi) = (a.row.min(b.row), a.row.max(b.row));
        Some((lo + 1..hi).map(|row| Pos::new(row, a.col)).collect())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_path_straight() {
        assert_eq!(
            axis_path(Pos::new(2, 2), Pos::new(2, 5)),
            vec![Pos::new(2, 3), Pos::new(2, 4), Pos::new(2, 5)]
        );
        assert_eq!(
            axis_path(Pos::new(4, 1), Pos::new(2, 1)),
            vec![Pos::new(3, 1), Pos::new(2, 1)]
        );
        assert!(axis_path(Pos::new(1, 1), Pos::new(1, 1)).is_empty());
    }

    #[test]
    fn test_axis_path_diagonal_is_axis_aligned() {
        let from = Pos::new(0, 0);
        let to = Pos::new(2, 3);
        let path = axis_path(from, to);
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&to));
        let mut prev = from;
        for step in path {
            assert_eq!(prev.chebyshev(step), 1);
            assert!(prev.row == step.row || prev.col == step.col, "{prev} -> {step}");
            prev = step;
        }
    }

    #[test]
    fn test_tiles_between() {
        assert_eq!(
            tiles_between(Pos::new(3, 0), Pos::new(3, 3)),
            Some(vec![Pos::new(3, 1), Pos::new(3, 2)])
        );
        assert_eq!(
            tiles_between(Pos::new(5, 2), Pos::new(1, 2)),
            Some(vec![Pos::new(2, 2), Pos::new(3, 2), Pos::new(4, 2)])
        );
        assert_eq!(tiles_between(Pos::new(1, 1), Pos::new(1, 2)), Some(vec![]));
        assert_eq!(tiles_between(Pos::new(1, 1), Pos::new(2, 2)), None);
    }

    #[test]
    fn test_transitive_closure_chain_and_cycle() {
        // 0-1-2 相連，3 孤立；1 與 0、2 互相連結不應重複加入
        let nodes = [0, 1, 2, 3];
        let linked = |a: &i32, b: &i32| (a - b).abs() == 1 && *a != 3 && *b != 3;
        assert_eq!(transitive_closure(&[0], &nodes, linked), vec![0, 1, 2]);
        assert_eq!(transitive_closure(&[3], &nodes, linked), vec![3]);
        // 重複的 seed 只算一次
        assert_eq!(transitive_closure(&[2, 2], &nodes, linked), vec![2, 1, 0]);
    }
}
