use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwardsError {
    #[error(transparent)]
    Common(#[from] trial_awards_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("only .xlsx is supported: {0}")]
    UnsupportedInput(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AwardsError>;
