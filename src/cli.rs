use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trial_awards_common::CompetitionKind;

#[derive(Parser)]
#[command(name = "trial-awards")]
#[command(about = "ドッグショーの順位・賞判定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時: ~/.config/trial-awards/settings.json）
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 出場表(.xlsx)から順位と受賞者を判定
    Calculate {
        /// 入力 .xlsx ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（省略時は入力ファイルに Winners シートを追加）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 競技種別 (obedience/rally)
        #[arg(short, long)]
        competition: CompetitionKind,

        /// クラス順位で同点を決着させる
        #[arg(short = 'n', long)]
        no_ties: bool,

        /// 同点を残す（設定の既定値を上書き）
        #[arg(long, conflicts_with = "no_ties")]
        keep_ties: bool,

        /// 新しいファイルに出力（<入力名>_scores.xlsx）
        #[arg(long)]
        new_file: bool,

        /// 入力ファイルに Winners シートを追加（設定の既定値を上書き）
        #[arg(long, conflicts_with = "new_file")]
        same_file: bool,

        /// 出力形式 (excel/json/both)
        #[arg(short, long, default_value = "excel")]
        format: ExportFormat,
    },

    /// 設定を表示/初期化
    Config {
        /// 既定の設定ファイルを書き出す
        #[arg(long)]
        init: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// オン/オフ両方のフラグと設定の既定値からスイッチを決める
///
/// 明示したフラグが優先。どちらも無ければ既定値。
pub fn resolve_flag(enable: bool, disable: bool, default: bool) -> bool {
    match (enable, disable) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Excel,
    Json,
    Both,
}

impl ExportFormat {
    pub fn includes_excel(&self) -> bool {
        matches!(self, ExportFormat::Excel | ExportFormat::Both)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::Both)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use excel, json, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
