//! 共通型定義

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// 競技種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionKind {
    Obedience,
    Rally,
}

impl std::str::FromStr for CompetitionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "obedience" => Ok(CompetitionKind::Obedience),
            "rally" => Ok(CompetitionKind::Rally),
            _ => Err(Error::InvalidCompetition(s.to_string())),
        }
    }
}

impl std::fmt::Display for CompetitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionKind::Obedience => write!(f, "obedience"),
            CompetitionKind::Rally => write!(f, "rally"),
        }
    }
}

/// 出場データの1行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContestantEntry {
    /// ゼッケン番号
    pub number: String,
    /// ハンドラー名
    pub handler: String,
    /// コールネーム（クラスをまたいだ同一犬の照合キー）
    pub call_name: String,
    /// クラス名（"Open B" など）
    pub class_name: String,
    /// 生のスコア文字列（"195.5+" など）
    pub raw_score: String,
    /// チャンピオン欄（オビディエンスのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<String>,
    /// グループ欄（オビディエンスのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// 正規化済みエントリ
///
/// 採点済みの行だけがこの形になる。構築後は変更しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    #[serde(flatten)]
    pub entry: ContestantEntry,
    /// 基本スコア（プラス記号を除いた数値）
    pub score: f64,
    /// 末尾の "+" の数
    pub plus_count: u32,
    /// クラス階層による順位（未登録クラスは0）
    pub class_rank: u32,
    /// 元の表での行位置（同点時の安定した並び順に使う）
    pub row: usize,
}

impl NormalizedEntry {
    pub fn call_name(&self) -> &str {
        &self.entry.call_name
    }

    pub fn class_name(&self) -> &str {
        &self.entry.class_name
    }

    /// 表示用スコア（プラス記号付き）
    pub fn display_score(&self) -> String {
        format!("{}{}", self.score, "+".repeat(self.plus_count as usize))
    }
}

/// シートから読み込んだ表（全セルを文字列化済み）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}
