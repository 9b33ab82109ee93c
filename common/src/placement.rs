//! クラス内順位モジュール
//!
//! 1クラス内で `(スコア, プラス数)` の降順に並べ、上位4件を返す。
//! 同点は同じ順位を共有し、次の順位は「自分より上の件数 + 1」になる。

use crate::types::NormalizedEntry;
use serde::Serialize;
use std::cmp::Ordering;

/// 表彰する順位数
pub const PLACEMENT_COUNT: usize = 4;

/// クラス内の順位
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// 1始まりの順位（同点は同じ値）
    pub position: usize,
    pub entry: NormalizedEntry,
}

/// `(スコア, プラス数)` の降順比較
pub fn compare_score_desc(a: &NormalizedEntry, b: &NormalizedEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.plus_count.cmp(&a.plus_count))
}

fn same_score(a: &NormalizedEntry, b: &NormalizedEntry) -> bool {
    compare_score_desc(a, b) == Ordering::Equal
}

/// クラス名が完全一致するエントリの上位4件を求める
///
/// 初心者クラス・プリファードクラスもクラス内順位の対象。
/// 該当なしは空のVec（「入賞なし」として扱う）。
pub fn class_placements(entries: &[NormalizedEntry], class_name: &str) -> Vec<Placement> {
    let mut ranked: Vec<&NormalizedEntry> = entries
        .iter()
        .filter(|e| e.class_name() == class_name)
        .collect();
    // 安定ソートなので同点は元の表の順に残る
    ranked.sort_by(|a, b| compare_score_desc(a, b));

    let mut placements: Vec<Placement> = Vec::with_capacity(PLACEMENT_COUNT);
    for (index, entry) in ranked.into_iter().take(PLACEMENT_COUNT).enumerate() {
        let position = match placements.last() {
            Some(previous) if same_score(&previous.entry, entry) => previous.position,
            _ => index + 1,
        };
        placements.push(Placement {
            position,
            entry: entry.clone(),
        });
    }

    placements
}
