//! Excel出力（CLI版）
//!
//! 受賞者シートの生成は共通ライブラリの excel_core を使用

use crate::error::{AwardsError, Result};
use crate::reader::{cell_text, SourceSheet, SourceWorkbook};
use calamine::{Data, ExcelDateTime};
use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet, XlsxError};
use std::path::Path;
use trial_awards_common::export::excel_core::{
    build_winners_worksheet, generate_excel_buffer, SheetLabels, WINNERS_SHEET_NAME,
};
use trial_awards_common::TrialReport;

/// 受賞者シートだけの新しいファイルを書き出す
pub fn write_new_workbook(report: &TrialReport, labels: &SheetLabels, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(report, labels).map_err(AwardsError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

/// 元のワークブックに受賞者シートを追加して書き出す
///
/// 既存シートはセル値と数式を書き写す。日付・時刻には表示形式を付け直すが、
/// それ以外の書式（色・罫線・列幅など）は引き継がない。
pub fn append_to_workbook(
    source: &SourceWorkbook,
    report: &TrialReport,
    labels: &SheetLabels,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let formats = CopyFormats::new();
    for sheet in &source.sheets {
        let worksheet = copy_sheet(sheet, &formats).map_err(|e| {
            AwardsError::ExcelGeneration(format!("シート「{}」の複製エラー: {}", sheet.name, e))
        })?;
        workbook.push_worksheet(worksheet);
    }

    let sheet_name = unique_sheet_name(&source.sheet_names(), WINNERS_SHEET_NAME);
    let winners = build_winners_worksheet(report, labels, &sheet_name)
        .map_err(|e| AwardsError::ExcelGeneration(format!("シート生成エラー: {}", e)))?;
    workbook.push_worksheet(winners);

    workbook
        .save(output_path)
        .map_err(|e| AwardsError::ExcelGeneration(format!("Excel保存エラー: {}", e)))?;
    tracing::debug!(sheet = %sheet_name, path = %output_path.display(), "winners sheet appended");
    Ok(())
}

/// 日付・時刻セルの表示形式
struct CopyFormats {
    date: Format,
    datetime: Format,
    duration: Format,
}

impl CopyFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            duration: Format::new().set_num_format("[h]:mm:ss"),
        }
    }

    fn for_datetime(&self, value: &ExcelDateTime) -> &Format {
        if value.is_duration() {
            &self.duration
        } else if value.as_f64().fract() == 0.0 {
            &self.date
        } else {
            &self.datetime
        }
    }
}

fn copy_sheet(sheet: &SourceSheet, formats: &CopyFormats) -> std::result::Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(&sheet.name)?;

    if let Some((start_row, start_col)) = sheet.cells.start() {
        for (row, col, cell) in sheet.cells.used_cells() {
            let row = start_row + row as u32;
            let col = (start_col as usize + col) as u16;
            match cell {
                Data::Int(value) => worksheet.write_number(row, col, *value as f64)?,
                Data::Float(value) => worksheet.write_number(row, col, *value)?,
                Data::Bool(value) => worksheet.write_boolean(row, col, *value)?,
                Data::String(value) => worksheet.write_string(row, col, value)?,
                Data::DateTime(value) => {
                    worksheet.write_number_with_format(row, col, value.as_f64(), formats.for_datetime(value))?
                }
                Data::Empty => continue,
                other => worksheet.write_string(row, col, other.to_string())?,
            };
        }
    }

    // 数式セルは値の上から数式で書き直す（キャッシュ値は結果として残す）
    if let Some((start_row, start_col)) = sheet.formulas.start() {
        for (row, col, formula) in sheet.formulas.used_cells() {
            let row = start_row + row as u32;
            let col = (start_col as usize + col) as u16;
            let cached = sheet
                .cells
                .get_value((row, col as u32))
                .map(cell_text)
                .unwrap_or_default();
            worksheet.write_formula(row, col, Formula::new(formula).set_result(cached))?;
        }
    }

    Ok(worksheet)
}

/// 既存シートと重ならないシート名（Winners, Winners1, ...）
pub fn unique_sheet_name(existing: &[&str], base: &str) -> String {
    let taken = |candidate: &str| existing.iter().any(|name| name.eq_ignore_ascii_case(candidate));

    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
