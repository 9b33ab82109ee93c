//! 列名解決モジュール
//!
//! ヘッダー名に対する部分一致（大文字小文字無視）で必要な列を探し、
//! 型付きの列マップを返す。0件・複数件一致は致命的な設定エラー。

use crate::error::{Error, Result};
use crate::types::{CompetitionKind, ContestantEntry, SheetTable};

const NUMBER_PATTERN: &str = "number";
const HANDLER_PATTERN: &str = "handler";
const CALL_NAME_PATTERN: &str = "call name";
const CLASS_PATTERN: &str = "class";
const SCORE_PATTERN: &str = "score";
const CHAMPION_PATTERN: &str = "champ";
const GROUP_PATTERN: &str = "group";

/// 列の位置とヘッダー名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub header: String,
}

/// 解決済みの列マップ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub number: Column,
    pub handler: Column,
    pub call_name: Column,
    pub class: Column,
    pub score: Column,
    pub champion: Option<Column>,
    pub group: Option<Column>,
}

impl ColumnMap {
    /// ヘッダー行から列を解決する
    ///
    /// オビディエンスではグループ列が必須、チャンピオン列は任意。
    pub fn discover(headers: &[String], kind: CompetitionKind) -> Result<Self> {
        let (champion, group) = match kind {
            CompetitionKind::Obedience => (
                find_optional(headers, CHAMPION_PATTERN)?,
                Some(find_required(headers, GROUP_PATTERN)?),
            ),
            CompetitionKind::Rally => (None, None),
        };

        Ok(Self {
            number: find_required(headers, NUMBER_PATTERN)?,
            handler: find_required(headers, HANDLER_PATTERN)?,
            call_name: find_required(headers, CALL_NAME_PATTERN)?,
            class: find_required(headers, CLASS_PATTERN)?,
            score: find_required(headers, SCORE_PATTERN)?,
            champion,
            group,
        })
    }

    pub fn has_champion(&self) -> bool {
        self.champion.is_some()
    }

    /// 表の各行を出場データに変換する
    pub fn extract_entries(&self, table: &SheetTable) -> Vec<ContestantEntry> {
        table
            .rows
            .iter()
            .map(|row| {
                let cell = |column: &Column| {
                    row.get(column.index)
                        .map(|value| value.trim().to_string())
                        .unwrap_or_default()
                };
                let optional = |column: &Option<Column>| {
                    column
                        .as_ref()
                        .map(|c| cell(c))
                        .filter(|value| !value.is_empty())
                };

                ContestantEntry {
                    number: cell(&self.number),
                    handler: cell(&self.handler),
                    call_name: cell(&self.call_name),
                    class_name: cell(&self.class),
                    raw_score: cell(&self.score),
                    champion: optional(&self.champion),
                    group: optional(&self.group),
                }
            })
            .collect()
    }
}

fn matching_columns(headers: &[String], pattern: &str) -> Vec<Column> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.to_lowercase().contains(pattern))
        .map(|(index, header)| Column {
            index,
            header: header.clone(),
        })
        .collect()
}

fn find_optional(headers: &[String], pattern: &str) -> Result<Option<Column>> {
    let mut matches = matching_columns(headers, pattern);
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => Err(Error::AmbiguousColumn(pattern_label(pattern).to_string())),
    }
}

fn find_required(headers: &[String], pattern: &str) -> Result<Column> {
    find_optional(headers, pattern)?
        .ok_or_else(|| Error::MissingColumn(pattern_label(pattern).to_string()))
}

fn pattern_label(pattern: &str) -> &str {
    match pattern {
        CHAMPION_PATTERN => "champion",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_discover_rally_columns() {
        let h = headers(&["Armband Number", "Handler", "Call Name", "Class", "Score"]);
        let columns = ColumnMap::discover(&h, CompetitionKind::Rally).unwrap();
        assert_eq!(columns.number.index, 0);
        assert_eq!(columns.call_name.header, "Call Name");
        assert_eq!(columns.score.index, 4);
        assert!(columns.group.is_none());
        assert!(!columns.has_champion());
    }

    #[test]
    fn test_discover_obedience_columns() {
        let h = headers(&["number", "HANDLER", "call name", "class", "score", "Champion", "Group"]);
        let columns = ColumnMap::discover(&h, CompetitionKind::Obedience).unwrap();
        assert_eq!(columns.champion.as_ref().map(|c| c.index), Some(5));
        assert_eq!(columns.group.as_ref().map(|c| c.index), Some(6));
    }

    #[test]
    fn test_obedience_requires_group() {
        let h = headers(&["number", "handler", "call name", "class", "score"]);
        let err = ColumnMap::discover(&h, CompetitionKind::Obedience).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref p) if p == "group"));
    }

    #[test]
    fn test_missing_required_column() {
        let h = headers(&["number", "handler", "class", "score"]);
        let err = ColumnMap::discover(&h, CompetitionKind::Rally).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref p) if p == "call name"));
    }

    #[test]
    fn test_ambiguous_column() {
        let h = headers(&["number", "handler", "call name", "class", "score", "Rally Score"]);
        let err = ColumnMap::discover(&h, CompetitionKind::Rally).unwrap_err();
        assert!(matches!(err, Error::AmbiguousColumn(ref p) if p == "score"));
    }

    #[test]
    fn test_ambiguous_champion_column() {
        let h = headers(&["number", "handler", "call name", "class", "score", "champ", "champion title", "group"]);
        let err = ColumnMap::discover(&h, CompetitionKind::Obedience).unwrap_err();
        assert!(matches!(err, Error::AmbiguousColumn(ref p) if p == "champion"));
    }

    #[test]
    fn test_extract_entries() {
        let h = headers(&["number", "handler", "call name", "class", "score", "champion", "group"]);
        let columns = ColumnMap::discover(&h, CompetitionKind::Obedience).unwrap();
        let table = SheetTable::new(
            h,
            vec![
                vec!["101", " Ann ", "Rex", "Open B", "198+", "CH", "Herding"],
                vec!["102", "Bob", "Fido", "Novice A", "NQ", "", ""],
            ]
            .into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect(),
        );

        let entries = columns.extract_entries(&table);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].handler, "Ann");
        assert_eq!(entries[0].raw_score, "198+");
        assert_eq!(entries[0].champion.as_deref(), Some("CH"));
        assert_eq!(entries[1].group, None);
    }
}
