//! 競技結果の集計
//!
//! 正規化済み出場表から、全クラスの順位と全賞の受賞者をまとめて求める。
//! 各解決は同じ読み取り専用の表を参照するだけなので、クラス順位は並列に計算する。

use crate::award::{award_catalog, resolve_award, AwardDefinition, WinnerSet};
use crate::placement::{class_placements, Placement};
use crate::roster::Roster;
use crate::types::CompetitionKind;
use rayon::prelude::*;
use serde::Serialize;

/// 集計オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOptions {
    pub kind: CompetitionKind,
    /// クラス順位で同点を決着させる
    pub break_ties: bool,
    /// チャンピオン列が存在する（オビディエンスのみ）
    pub has_champion_column: bool,
}

/// 1クラスの順位結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassResult {
    pub class_name: String,
    pub placements: Vec<Placement>,
}

/// 1つの賞の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardResult {
    pub name: String,
    pub winners: WinnerSet,
}

/// 競技全体の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    pub kind: CompetitionKind,
    pub classes: Vec<ClassResult>,
    /// 賞（オビディエンスではグループ賞が後に続く）
    pub awards: Vec<AwardResult>,
}

impl TrialReport {
    /// 受賞者なしのクラス・賞の数
    pub fn empty_count(&self) -> usize {
        self.classes.iter().filter(|c| c.placements.is_empty()).count()
            + self.awards.iter().filter(|a| a.winners.is_empty()).count()
    }
}

/// 全クラス・全賞を解決する
pub fn resolve_trial(roster: &Roster, options: &TrialOptions) -> TrialReport {
    let entries = roster.entries();

    let classes: Vec<ClassResult> = roster
        .class_names()
        .par_iter()
        .map(|class_name| ClassResult {
            class_name: class_name.clone(),
            placements: class_placements(entries, class_name),
        })
        .collect();

    let mut definitions = award_catalog(options.kind, options.has_champion_column);
    if options.kind == CompetitionKind::Obedience {
        definitions.extend(roster.group_names().iter().map(|g| AwardDefinition::group(g)));
    }

    let awards = definitions
        .iter()
        .map(|award| AwardResult {
            name: award.name.clone(),
            winners: resolve_award(entries, award, options.break_ties),
        })
        .collect();

    let report = TrialReport {
        kind: options.kind,
        classes,
        awards,
    };
    tracing::info!(
        classes = report.classes.len(),
        awards = report.awards.len(),
        empty = report.empty_count(),
        "trial resolved"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::ClassHierarchy;
    use crate::types::ContestantEntry;

    fn row(number: &str, call_name: &str, class_name: &str, raw_score: &str, group: &str) -> ContestantEntry {
        ContestantEntry {
            number: number.to_string(),
            handler: format!("Handler {}", number),
            call_name: call_name.to_string(),
            class_name: class_name.to_string(),
            raw_score: raw_score.to_string(),
            champion: None,
            group: Some(group.to_string()).filter(|g| !g.is_empty()),
        }
    }

    fn obedience_roster() -> Roster {
        Roster::build(
            vec![
                row("1", "Rex", "Open B", "198", "Herding"),
                row("2", "Fido", "Open B", "199", "Toy"),
                row("3", "Rex", "Utility B", "197", "Herding"),
                row("4", "Spot", "Novice A", "195.5+", "Sporting"),
                row("5", "Max", "Novice A", "NQ", "Sporting"),
                row("6", "Bella", "Utility A", "AB", ""),
            ],
            &ClassHierarchy::default(),
        )
    }

    fn options(kind: CompetitionKind) -> TrialOptions {
        TrialOptions {
            kind,
            break_ties: false,
            has_champion_column: false,
        }
    }

    #[test]
    fn test_obedience_report() {
        let report = resolve_trial(&obedience_roster(), &options(CompetitionKind::Obedience));

        let class_names: Vec<&str> = report.classes.iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(class_names, vec!["Open B", "Utility B", "Novice A", "Utility A"]);
        assert!(report.classes[3].placements.is_empty());

        let award_names: Vec<&str> = report.awards.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            award_names,
            vec![
                "High in Trial",
                "High Combined",
                "High Combined Preferred",
                "Herding",
                "Toy",
                "Sporting"
            ]
        );

        let high_in_trial = &report.awards[0].winners;
        assert_eq!(high_in_trial.as_slice()[0].call_name(), "Fido");

        let high_combined = &report.awards[1].winners;
        assert_eq!(high_combined.len(), 1);
        assert_eq!(high_combined.as_slice()[0].call_name(), "Rex");
        assert_eq!(high_combined.as_slice()[0].score, 395.0);

        assert!(report.awards[2].winners.is_empty());
        assert_eq!(report.empty_count(), 2);
    }

    #[test]
    fn test_rally_report_has_no_group_awards() {
        let report = resolve_trial(&obedience_roster(), &options(CompetitionKind::Rally));
        let award_names: Vec<&str> = report.awards.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(award_names, vec!["High Combined", "High Triple"]);
    }

    #[test]
    fn test_report_is_reproducible() {
        let roster = obedience_roster();
        let opts = TrialOptions {
            break_ties: true,
            ..options(CompetitionKind::Obedience)
        };
        assert_eq!(resolve_trial(&roster, &opts), resolve_trial(&roster, &opts));
    }
}
