pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::reader::SourceWorkbook;
use std::path::{Path, PathBuf};
use trial_awards_common::export::excel_core::SheetLabels;
use trial_awards_common::TrialReport;

/// Excelの書き出し先
pub enum ExcelTarget<'a> {
    /// 受賞者シートだけの新規ファイル
    NewFile,
    /// 元のワークブックに受賞者シートを追加
    AppendTo(&'a SourceWorkbook),
}

fn json_path_for(output: &Path) -> PathBuf {
    output.with_extension("json")
}

/// 競技結果をJSONで保存
pub fn write_json(report: &TrialReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 出力した全ファイルのパスを返す
pub fn export_report(
    report: &TrialReport,
    labels: &SheetLabels,
    format: ExportFormat,
    target: ExcelTarget<'_>,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if format.includes_excel() {
        match target {
            ExcelTarget::NewFile => excel::write_new_workbook(report, labels, output)?,
            ExcelTarget::AppendTo(source) => excel::append_to_workbook(source, report, labels, output)?,
        }
        written.push(output.to_path_buf());
    }

    if format.includes_json() {
        let json_path = json_path_for(output);
        write_json(report, &json_path)?;
        written.push(json_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_path_for() {
        assert_eq!(
            json_path_for(Path::new("/tmp/show_scores.xlsx")),
            PathBuf::from("/tmp/show_scores.json")
        );
    }
}
