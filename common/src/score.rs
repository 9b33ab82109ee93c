//! スコア正規化モジュール
//!
//! "195.5+" のようなスコア表記を `(基本スコア, プラス数)` に分解する。
//! プラスは同点時の第2キーとしてだけ使い、数値には加算しない。

use serde::{Deserialize, Serialize};

/// 正規化したスコア
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NormalizedScore {
    /// 採点済み
    Scored { score: f64, plus_count: u32 },
    /// 欠場・NQ・空欄など
    Unscored,
}

/// スコア文字列を正規化する
///
/// 末尾の "+" を1つずつ取り除いて数え、残りを数値として解釈する。
/// 数字と小数点以外の文字を含む場合は `Unscored`。
pub fn normalize_score(raw: &str) -> NormalizedScore {
    let mut rest = raw.trim();
    let mut plus_count = 0u32;

    while let Some(stripped) = rest.strip_suffix('+') {
        rest = stripped.trim_end();
        plus_count += 1;
    }

    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return NormalizedScore::Unscored;
    }
    if !rest.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return NormalizedScore::Unscored;
    }

    match rest.parse::<f64>() {
        Ok(score) if score.is_finite() => NormalizedScore::Scored { score, plus_count },
        _ => NormalizedScore::Unscored,
    }
}
