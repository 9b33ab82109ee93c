//! 受賞者シート生成（共通ライブラリ）
//!
//! クラスごとの順位ブロックと賞ごとの受賞者ブロックを1枚のシートに書き出す。

use crate::columns::ColumnMap;
use crate::report::{AwardResult, ClassResult, TrialReport};
use rust_xlsxwriter::*;

/// 受賞者シートの既定名
pub const WINNERS_SHEET_NAME: &str = "Winners";

/// 受賞なしの印
const NO_WINNER_MARK: &str = "-";

/// 順位ごとのリボン色（背景, 文字）: 青, 赤, 黄, 白
const RIBBON_COLORS: [(u32, u32); 4] = [
    (0x0000FF, 0xFFFFFF),
    (0xFF0000, 0xFFFFFF),
    (0xFFFF00, 0x000000),
    (0xFFFFFF, 0x000000),
];

const COLUMN_COUNT: usize = 5;

/// 見出しに使う列ラベル（元の表のヘッダー名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLabels {
    pub number: String,
    pub handler: String,
    pub call_name: String,
    pub score: String,
}

impl Default for SheetLabels {
    fn default() -> Self {
        Self {
            number: "Number".into(),
            handler: "Handler".into(),
            call_name: "Call Name".into(),
            score: "Score".into(),
        }
    }
}

impl From<&ColumnMap> for SheetLabels {
    fn from(columns: &ColumnMap) -> Self {
        Self {
            number: columns.number.header.clone(),
            handler: columns.handler.header.clone(),
            call_name: columns.call_name.header.clone(),
            score: columns.score.header.clone(),
        }
    }
}

/// 行を順に追記しながら列幅を記録する
struct SheetWriter {
    worksheet: Worksheet,
    row: u32,
    widths: [usize; COLUMN_COUNT],
}

impl SheetWriter {
    fn new(worksheet: Worksheet) -> Self {
        Self {
            worksheet,
            row: 0,
            widths: [0; COLUMN_COUNT],
        }
    }

    fn track(&mut self, col: u16, text: &str) {
        let width = &mut self.widths[col as usize];
        *width = (*width).max(text.chars().count());
    }

    fn text(&mut self, col: u16, text: &str, format: Option<&Format>) -> Result<(), XlsxError> {
        self.track(col, text);
        match format {
            Some(format) => self.worksheet.write_string_with_format(self.row, col, text, format)?,
            None => self.worksheet.write_string(self.row, col, text)?,
        };
        Ok(())
    }

    fn next_row(&mut self) {
        self.row += 1;
    }

    fn finish(mut self) -> Result<Worksheet, XlsxError> {
        for (col, width) in self.widths.iter().enumerate() {
            if *width > 0 {
                self.worksheet.set_column_width(col as u16, (*width + 2) as f64)?;
            }
        }
        Ok(self.worksheet)
    }
}

struct Formats {
    bold: Format,
    title: Format,
    ribbons: Vec<Format>,
}

impl Formats {
    fn new() -> Self {
        let ribbons = RIBBON_COLORS
            .iter()
            .map(|(background, font)| {
                Format::new()
                    .set_background_color(Color::RGB(*background))
                    .set_font_color(Color::RGB(*font))
            })
            .collect();

        Self {
            bold: Format::new().set_bold(),
            title: Format::new().set_bold().set_align(FormatAlign::Center),
            ribbons,
        }
    }

    fn ribbon(&self, position: usize) -> Option<&Format> {
        position.checked_sub(1).and_then(|index| self.ribbons.get(index))
    }
}

fn write_sub_header(writer: &mut SheetWriter, labels: &SheetLabels, formats: &Formats) -> Result<(), XlsxError> {
    writer.text(1, &labels.number, Some(&formats.bold))?;
    writer.text(2, &labels.handler, Some(&formats.bold))?;
    writer.text(3, &labels.call_name, Some(&formats.bold))?;
    writer.text(4, &labels.score, Some(&formats.bold))?;
    writer.next_row();
    Ok(())
}

fn write_class_block(
    writer: &mut SheetWriter,
    class: &ClassResult,
    labels: &SheetLabels,
    formats: &Formats,
) -> Result<(), XlsxError> {
    // クラス名（B〜E列をマージ）
    writer.track(1, &class.class_name);
    writer
        .worksheet
        .merge_range(writer.row, 1, writer.row, 4, &class.class_name, &formats.title)?;
    writer.next_row();

    write_sub_header(writer, labels, formats)?;

    if class.placements.is_empty() {
        for col in 1..=4 {
            writer.text(col, NO_WINNER_MARK, None)?;
        }
        writer.next_row();
    }

    for placement in &class.placements {
        let entry = &placement.entry;
        let format = formats.ribbon(placement.position);
        let position = placement.position.to_string();
        writer.track(0, &position);
        writer.worksheet.write_number(writer.row, 0, placement.position as f64)?;
        writer.text(1, &entry.entry.number, format)?;
        writer.text(2, &entry.entry.handler, format)?;
        writer.text(3, &entry.entry.call_name, format)?;
        writer.text(4, &entry.display_score(), format)?;
        writer.next_row();
    }

    // 区切りの空行
    writer.next_row();
    Ok(())
}

fn write_award_block(writer: &mut SheetWriter, award: &AwardResult, formats: &Formats) -> Result<(), XlsxError> {
    if award.winners.is_empty() {
        writer.text(0, &award.name, Some(&formats.bold))?;
        for col in 1..=3 {
            writer.text(col, NO_WINNER_MARK, None)?;
        }
        writer.next_row();
        return Ok(());
    }

    for (index, winner) in award.winners.iter().enumerate() {
        if index == 0 {
            writer.text(0, &award.name, Some(&formats.bold))?;
        }
        writer.text(1, &winner.entry.number, None)?;
        writer.text(2, &winner.entry.handler, None)?;
        writer.text(3, &winner.entry.call_name, None)?;
        writer.text(4, &winner.display_score(), None)?;
        writer.next_row();
    }
    Ok(())
}

/// 受賞者シートを生成
///
/// # Arguments
/// * `report` - 競技結果
/// * `labels` - 見出しの列ラベル
/// * `sheet_name` - シート名
pub fn build_winners_worksheet(
    report: &TrialReport,
    labels: &SheetLabels,
    sheet_name: &str,
) -> Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(sheet_name)?;

    let formats = Formats::new();
    let mut writer = SheetWriter::new(worksheet);

    for class in &report.classes {
        write_class_block(&mut writer, class, labels, &formats)?;
    }

    write_sub_header(&mut writer, labels, &formats)?;
    for award in &report.awards {
        write_award_block(&mut writer, award, &formats)?;
    }

    writer.finish()
}

/// 受賞者シートだけのExcelをバッファに生成
pub fn generate_excel_buffer(report: &TrialReport, labels: &SheetLabels) -> Result<Vec<u8>, String> {
    let worksheet = build_winners_worksheet(report, labels, WINNERS_SHEET_NAME)
        .map_err(|e| format!("シート生成エラー: {}", e))?;

    let mut workbook = Workbook::new();
    workbook.push_worksheet(worksheet);
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
