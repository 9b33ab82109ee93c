//! 賞の解決モジュール
//!
//! 複数クラスをまたぐ賞（High in Trial、High Combined など）の受賞者を求める。
//!
//! ## 処理フロー
//! 1. 対象条件で絞り込み、初心者・プリファードクラスを除外
//! 2. 単一クラス賞: 最高スコアの候補から受賞者を決定
//! 3. 合算賞: コールネームごとに必要クラス数を満たす犬のスコアを合算
//! 4. 同点決着（クラス順位 → スコア → プラス数）

use crate::placement::compare_score_desc;
use crate::types::{CompetitionKind, ContestantEntry, NormalizedEntry};
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

lazy_static::lazy_static! {
    /// 賞の対象外クラス
    static ref EXCLUDED_CLASS_RE: Regex = Regex::new(r"(?i)begin|preferred").unwrap();
    static ref B_CLASS_RE: Regex = Regex::new(r"(?i)\sb$").unwrap();
    static ref OBEDIENCE_COMBINED_RE: Regex = Regex::new(r"(?i)open b|utility b").unwrap();
    static ref PREFERRED_COMBINED_RE: Regex = Regex::new(r"(?i)preferred open|preferred utility").unwrap();
    static ref RALLY_COMBINED_RE: Regex =
        Regex::new(r"(?i)r(ally)? excellent b|r(ally)? advanced? b").unwrap();
    static ref RALLY_TRIPLE_RE: Regex =
        Regex::new(r"(?i)r(ally)? excellent b|r(ally)? advanced? b|r(ally)? master").unwrap();
    /// チャンピオン欄の "Ch"（大文字小文字を区別）
    static ref CHAMPION_RE: Regex = Regex::new(r"Ch").unwrap();
}

/// 受賞対象の条件
#[derive(Debug, Clone)]
pub enum Eligibility {
    /// クラス名が正規表現に一致
    ClassMatches(Regex),
    /// チャンピオン欄が正規表現に一致
    ChampionMatches(Regex),
    /// グループ欄が完全一致
    GroupEquals(String),
}

impl Eligibility {
    pub fn matches(&self, entry: &ContestantEntry) -> bool {
        match self {
            Eligibility::ClassMatches(re) => re.is_match(&entry.class_name),
            Eligibility::ChampionMatches(re) => entry
                .champion
                .as_deref()
                .map(|value| re.is_match(value))
                .unwrap_or(false),
            Eligibility::GroupEquals(group) => entry.group.as_deref() == Some(group.as_str()),
        }
    }
}

/// 賞の定義
#[derive(Debug, Clone)]
pub struct AwardDefinition {
    pub name: String,
    pub eligibility: Eligibility,
    /// 合算賞で必要な異なるクラス数（単一クラス賞は `None`）
    pub required_class_count: Option<usize>,
}

impl AwardDefinition {
    pub fn single(name: impl Into<String>, eligibility: Eligibility) -> Self {
        Self {
            name: name.into(),
            eligibility,
            required_class_count: None,
        }
    }

    pub fn combined(name: impl Into<String>, eligibility: Eligibility, required_class_count: usize) -> Self {
        Self {
            name: name.into(),
            eligibility,
            required_class_count: Some(required_class_count),
        }
    }

    /// グループ賞（そのグループ内の単一クラス賞）
    pub fn group(group: &str) -> Self {
        Self::single(group, Eligibility::GroupEquals(group.to_string()))
    }
}

/// 競技種別ごとの賞一覧
///
/// High Scoring Champion of Record はチャンピオン列がある場合のみ。
pub fn award_catalog(kind: CompetitionKind, has_champion_column: bool) -> Vec<AwardDefinition> {
    match kind {
        CompetitionKind::Obedience => {
            let mut awards = vec![
                AwardDefinition::single("High in Trial", Eligibility::ClassMatches(B_CLASS_RE.clone())),
                AwardDefinition::combined(
                    "High Combined",
                    Eligibility::ClassMatches(OBEDIENCE_COMBINED_RE.clone()),
                    2,
                ),
                AwardDefinition::combined(
                    "High Combined Preferred",
                    Eligibility::ClassMatches(PREFERRED_COMBINED_RE.clone()),
                    2,
                ),
            ];
            if has_champion_column {
                awards.push(AwardDefinition::single(
                    "High Scoring Champion of Record",
                    Eligibility::ChampionMatches(CHAMPION_RE.clone()),
                ));
            }
            awards
        }
        CompetitionKind::Rally => vec![
            AwardDefinition::combined(
                "High Combined",
                Eligibility::ClassMatches(RALLY_COMBINED_RE.clone()),
                2,
            ),
            AwardDefinition::combined(
                "High Triple",
                Eligibility::ClassMatches(RALLY_TRIPLE_RE.clone()),
                3,
            ),
        ],
    }
}

/// 受賞者の集合（空なら「受賞者なし」）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WinnerSet {
    winners: Vec<NormalizedEntry>,
}

impl WinnerSet {
    pub fn new(winners: Vec<NormalizedEntry>) -> Self {
        Self { winners }
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedEntry> {
        self.winners.iter()
    }

    pub fn as_slice(&self) -> &[NormalizedEntry] {
        &self.winners
    }
}

impl<'a> IntoIterator for &'a WinnerSet {
    type Item = &'a NormalizedEntry;
    type IntoIter = std::slice::Iter<'a, NormalizedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.winners.iter()
    }
}

/// 初心者・プリファードクラスか
pub fn is_excluded_class(class_name: &str) -> bool {
    EXCLUDED_CLASS_RE.is_match(class_name)
}

/// 賞の受賞者を求める
///
/// # Arguments
/// * `entries` - 正規化済みエントリ
/// * `award` - 賞の定義
/// * `break_ties` - クラス順位で同点を1件に絞る
pub fn resolve_award(entries: &[NormalizedEntry], award: &AwardDefinition, break_ties: bool) -> WinnerSet {
    let mut eligible: Vec<&NormalizedEntry> = entries
        .iter()
        .filter(|e| award.eligibility.matches(&e.entry))
        .filter(|e| !is_excluded_class(e.class_name()))
        .collect();
    // スコア降順・同点は元の表の順
    eligible.sort_by(|a, b| b.score.total_cmp(&a.score));

    if eligible.is_empty() {
        return WinnerSet::default();
    }

    let winners = match award.required_class_count {
        None => resolve_single(&eligible, break_ties),
        Some(required) => resolve_combined(&eligible, required, break_ties),
    };

    tracing::debug!(award = %award.name, winners = winners.len(), "award resolved");
    WinnerSet::new(winners)
}

/// クラス順位 → スコア → プラス数の降順比較
fn compare_class_rank_desc(a: &NormalizedEntry, b: &NormalizedEntry) -> std::cmp::Ordering {
    b.class_rank
        .cmp(&a.class_rank)
        .then_with(|| compare_score_desc(a, b))
}

fn resolve_single(eligible: &[&NormalizedEntry], break_ties: bool) -> Vec<NormalizedEntry> {
    let top_score = eligible[0].score;
    let candidates: Vec<&NormalizedEntry> = eligible
        .iter()
        .copied()
        .filter(|e| e.score == top_score)
        .collect();

    if break_ties {
        return candidates
            .iter()
            .copied()
            .min_by(|a, b| compare_class_rank_desc(a, b))
            .cloned()
            .into_iter()
            .collect();
    }

    let class_count = candidates
        .iter()
        .map(|e| e.class_name())
        .collect::<HashSet<_>>()
        .len();
    if class_count > 1 {
        // クラスが異なる場合はプラスで比較しない
        return candidates.into_iter().cloned().collect();
    }

    let top_plus = candidates.iter().map(|e| e.plus_count).max().unwrap_or(0);
    candidates
        .into_iter()
        .filter(|e| e.plus_count == top_plus)
        .cloned()
        .collect()
}

fn resolve_combined(eligible: &[&NormalizedEntry], required: usize, break_ties: bool) -> Vec<NormalizedEntry> {
    // コールネームごとの出場クラス
    let mut classes_by_name: HashMap<&str, HashSet<&str>> = HashMap::new();
    for entry in eligible {
        classes_by_name
            .entry(entry.call_name())
            .or_default()
            .insert(entry.class_name());
    }

    let qualified: Vec<&NormalizedEntry> = eligible
        .iter()
        .copied()
        .filter(|e| classes_by_name[e.call_name()].len() >= required)
        .collect();
    if qualified.is_empty() {
        return Vec::new();
    }

    // 合算スコア（出現順を保持）
    let mut totals: Vec<(&str, f64)> = Vec::new();
    for entry in &qualified {
        match totals.iter_mut().find(|(name, _)| *name == entry.call_name()) {
            Some((_, total)) => *total += entry.score,
            None => totals.push((entry.call_name(), entry.score)),
        }
    }

    let best = totals
        .iter()
        .map(|(_, total)| *total)
        .fold(f64::NEG_INFINITY, f64::max);
    let mut tied: Vec<&str> = totals
        .iter()
        .filter(|(_, total)| *total == best)
        .map(|(name, _)| *name)
        .collect();

    if break_ties && tied.len() > 1 {
        let top = qualified
            .iter()
            .copied()
            .filter(|e| tied.contains(&e.call_name()))
            .min_by(|a, b| compare_class_rank_desc(a, b));
        if let Some(top) = top {
            tied = vec![top.call_name()];
        }
    }

    // コールネームごとに1件、スコアを合算値に置き換える
    tied.iter()
        .filter_map(|name| qualified.iter().find(|e| e.call_name() == *name))
        .map(|representative| {
            let mut winner = (*representative).clone();
            winner.score = best;
            winner
        })
        .collect()
}
