//! 正規化済み出場表
//!
//! 生の出場データから採点済みの行だけを取り出し、スコアとクラス順位を付与する。
//! 構築後は読み取り専用で、各クラス・各賞の解決はこの表を共有して行う。

use crate::hierarchy::ClassHierarchy;
use crate::score::{normalize_score, NormalizedScore};
use crate::types::{ContestantEntry, NormalizedEntry};

#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<NormalizedEntry>,
    class_names: Vec<String>,
    unscored: usize,
}

impl Roster {
    /// 出場データから構築する
    ///
    /// クラス一覧は採点不能行を除く前に集めるため、全員NQのクラスも残る。
    pub fn build(rows: Vec<ContestantEntry>, hierarchy: &ClassHierarchy) -> Self {
        let class_names = distinct_non_empty(rows.iter().map(|r| r.class_name.as_str()));

        let mut entries = Vec::with_capacity(rows.len());
        let mut unscored = 0;

        for (row, entry) in rows.into_iter().enumerate() {
            match normalize_score(&entry.raw_score) {
                NormalizedScore::Scored { score, plus_count } => {
                    let class_rank = hierarchy.rank(&entry.class_name);
                    entries.push(NormalizedEntry {
                        entry,
                        score,
                        plus_count,
                        class_rank,
                        row,
                    });
                }
                NormalizedScore::Unscored => unscored += 1,
            }
        }

        tracing::debug!(
            scored = entries.len(),
            unscored,
            classes = class_names.len(),
            "roster built"
        );

        Self {
            entries,
            class_names,
            unscored,
        }
    }

    pub fn entries(&self) -> &[NormalizedEntry] {
        &self.entries
    }

    /// 出現順のクラス名一覧
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// 採点済みエントリの出現順グループ名一覧
    pub fn group_names(&self) -> Vec<String> {
        distinct_non_empty(self.entries.iter().filter_map(|e| e.entry.group.as_deref()))
    }

    /// 除外した採点不能行の数
    pub fn unscored_count(&self) -> usize {
        self.unscored
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn distinct_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
