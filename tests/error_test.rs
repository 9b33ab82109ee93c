//! エラーケーステスト
//!
//! 致命的エラーは判定前に検出され、出力ファイルを作らないことを検証

use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;
use trial_awards::calculate::{calculate, CalculationRequest};
use trial_awards::cli::ExportFormat;
use trial_awards::config::Settings;
use trial_awards::error::AwardsError;
use trial_awards_common::{CompetitionKind, Error};

fn write_headers(path: &Path, headers: &[&str]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    worksheet.write_string(1, 0, "1").unwrap();
    workbook.save(path).unwrap();
}

fn run(input: &Path, output: &Path, kind: CompetitionKind) -> Result<(), AwardsError> {
    let request = CalculationRequest {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        kind,
        break_ties: false,
        format: ExportFormat::Both,
    };
    calculate(&request, &Settings::default()).map(|_| ())
}

/// .xlsx 以外は拒否
#[test]
fn test_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("entries.csv");
    std::fs::write(&input, "number,handler").unwrap();

    let err = run(&input, &dir.path().join("out.xlsx"), CompetitionKind::Rally).unwrap_err();
    assert!(matches!(err, AwardsError::UnsupportedInput(_)));
}

/// 存在しないファイル
#[test]
fn test_file_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = run(
        &dir.path().join("missing.xlsx"),
        &dir.path().join("out.xlsx"),
        CompetitionKind::Rally,
    )
    .unwrap_err();
    assert!(matches!(err, AwardsError::FileNotFound(_)));
}

/// 壊れたファイル
#[test]
fn test_corrupt_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, "not a zip").unwrap();

    let err = run(&input, &dir.path().join("out.xlsx"), CompetitionKind::Rally).unwrap_err();
    assert!(matches!(err, AwardsError::Workbook(_)));
}

/// 必須列が無い場合は何も出力しない
#[test]
fn test_missing_column_produces_no_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("entries.xlsx");
    let output = dir.path().join("out.xlsx");
    write_headers(&input, &["Number", "Handler", "Class", "Score"]);

    let err = run(&input, &output, CompetitionKind::Rally).unwrap_err();
    assert!(matches!(err, AwardsError::Common(Error::MissingColumn(_))));
    assert_eq!(format!("{}", err), "no 'call name' column detected");
    assert!(!output.exists());
    assert!(!dir.path().join("out.json").exists());
}

/// 複数一致する列
#[test]
fn test_ambiguous_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("entries.xlsx");
    let output = dir.path().join("out.xlsx");
    write_headers(
        &input,
        &["Number", "Handler", "Call Name", "Class", "Score", "Group", "Group 2"],
    );

    let err = run(&input, &output, CompetitionKind::Obedience).unwrap_err();
    assert!(matches!(err, AwardsError::Common(Error::AmbiguousColumn(_))));
    assert!(!output.exists());
}

/// オビディエンスはグループ列が必須、ラリーは不要
#[test]
fn test_group_column_only_required_for_obedience() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("entries.xlsx");
    write_headers(&input, &["Number", "Handler", "Call Name", "Class", "Score"]);

    let err = run(&input, &dir.path().join("o.xlsx"), CompetitionKind::Obedience).unwrap_err();
    assert!(matches!(err, AwardsError::Common(Error::MissingColumn(_))));

    assert!(run(&input, &dir.path().join("r.xlsx"), CompetitionKind::Rally).is_ok());
}

/// AwardsErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        AwardsError::Config("テスト設定エラー".to_string()),
        AwardsError::UnsupportedInput("a.csv".to_string()),
        AwardsError::FileNotFound("a.xlsx".to_string()),
        AwardsError::Workbook("壊れています".to_string()),
        AwardsError::ExcelGeneration("Excel生成エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let err: AwardsError = Error::InvalidCompetition("agility".to_string()).into();
    assert!(matches!(err, AwardsError::Common(_)));
    assert!(format!("{}", err).contains("agility"));
}
