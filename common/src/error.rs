//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// いずれも解決処理の開始前に検出される致命的な設定エラー。
/// 採点できない行（NQ・欠場など）はエラーにせず除外する。
#[derive(Error, Debug)]
pub enum Error {
    #[error("no '{0}' column detected")]
    MissingColumn(String),

    #[error("multiple '{0}' columns detected")]
    AmbiguousColumn(String),

    #[error("competition type must be 'obedience' or 'rally' (got '{0}')")]
    InvalidCompetition(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
