//! 判定処理の実行
//!
//! 入力検証・列解決などの致命的エラーはすべて判定開始前に検出し、
//! その場合は何も出力しない。

use crate::cli::ExportFormat;
use crate::config::Settings;
use crate::error::Result;
use crate::export::{self, ExcelTarget};
use crate::reader;
use std::path::{Path, PathBuf};
use trial_awards_common::export::excel_core::SheetLabels;
use trial_awards_common::{resolve_trial, ColumnMap, CompetitionKind, Roster, TrialOptions, TrialReport};

/// 判定リクエスト
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: CompetitionKind,
    pub break_ties: bool,
    pub format: ExportFormat,
}

/// 判定結果
#[derive(Debug)]
pub struct CalculationSummary {
    pub report: TrialReport,
    /// 除外した採点不能行の数
    pub unscored: usize,
    pub written: Vec<PathBuf>,
}

/// 出力先を決める
///
/// 明示指定を優先し、新規ファイル指定なら `<入力名>_scores.xlsx`、
/// それ以外は入力ファイル自体（Winners シートを追加）。
pub fn resolve_output_path(input: &Path, output: Option<&Path>, new_file: bool) -> PathBuf {
    if let Some(output) = output {
        return output.to_path_buf();
    }
    if !new_file {
        return input.to_path_buf();
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "entries".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "xlsx".to_string());
    input.with_file_name(format!("{}_scores.{}", stem, extension))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// 出場表を読み込み、順位と受賞者を判定して書き出す
pub fn calculate(request: &CalculationRequest, settings: &Settings) -> Result<CalculationSummary> {
    let source = reader::read_workbook(&request.input)?;
    let table = source.first_table()?;
    let columns = ColumnMap::discover(&table.headers, request.kind)?;

    let roster = Roster::build(columns.extract_entries(&table), &settings.class_hierarchy);
    let options = TrialOptions {
        kind: request.kind,
        break_ties: request.break_ties,
        has_champion_column: columns.has_champion(),
    };
    let report = resolve_trial(&roster, &options);

    let target = if is_same_file(&request.input, &request.output) {
        ExcelTarget::AppendTo(&source)
    } else {
        ExcelTarget::NewFile
    };
    let labels = SheetLabels::from(&columns);
    let written = export::export_report(&report, &labels, request.format, target, &request.output)?;

    tracing::info!(output = %request.output.display(), files = written.len(), "results written");
    Ok(CalculationSummary {
        report,
        unscored: roster.unscored_count(),
        written,
    })
}
