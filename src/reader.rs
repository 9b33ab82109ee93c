//! 出場表(.xlsx)読み込み
//!
//! 先頭シートの1行目をヘッダーとして全セルを文字列化する。
//! 同一ファイルへの書き戻し用に、全シートのセル値と数式も保持する。

use crate::error::{AwardsError, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;
use trial_awards_common::SheetTable;

const SUPPORTED_EXTENSION: &str = "xlsx";

/// 読み込んだシート
pub struct SourceSheet {
    pub name: String,
    /// セル値（数式セルはキャッシュ値）
    pub cells: Range<Data>,
    /// 数式（先頭の "=" なし、数式でないセルは空文字）
    pub formulas: Range<String>,
}

/// 読み込んだワークブック
pub struct SourceWorkbook {
    /// 元の順序
    pub sheets: Vec<SourceSheet>,
}

impl SourceWorkbook {
    /// 先頭シートを表として取り出す
    pub fn first_table(&self) -> Result<SheetTable> {
        let SourceSheet { name, cells, .. } = self
            .sheets
            .first()
            .ok_or_else(|| AwardsError::Workbook("シートがありません".into()))?;

        let mut rows = cells.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| AwardsError::Workbook(format!("シート「{}」が空です", name)))?
            .iter()
            .map(cell_text)
            .collect();

        let rows: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        tracing::debug!(sheet = %name, columns = headers.len(), rows = rows.len(), "sheet read");
        Ok(SheetTable::new(headers, rows))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

/// 入力ファイルの検証（拡張子・存在確認）
pub fn validate_input(path: &Path) -> Result<()> {
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(SUPPORTED_EXTENSION))
        .unwrap_or(false);
    if !is_xlsx {
        return Err(AwardsError::UnsupportedInput(path.display().to_string()));
    }

    if !path.exists() {
        return Err(AwardsError::FileNotFound(path.display().to_string()));
    }

    Ok(())
}

/// ワークブックを読み込む
pub fn read_workbook(path: &Path) -> Result<SourceWorkbook> {
    validate_input(path)?;

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| AwardsError::Workbook(e.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let cells = workbook
            .worksheet_range(&name)
            .map_err(|e| AwardsError::Workbook(format!("{}: {}", name, e)))?;
        let formulas = workbook
            .worksheet_formula(&name)
            .map_err(|e| AwardsError::Workbook(format!("{}: {}", name, e)))?;
        sheets.push(SourceSheet { name, cells, formulas });
    }

    if sheets.is_empty() {
        return Err(AwardsError::Workbook(format!(
            "シートがありません: {}",
            path.display()
        )));
    }

    Ok(SourceWorkbook { sheets })
}

/// セル値を文字列化（空セルは空文字）
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
