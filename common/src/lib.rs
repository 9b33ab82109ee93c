//! Trial Awards Common Library
//!
//! ドッグショー（オビディエンス・ラリー）の出場表から
//! クラス順位と賞の受賞者を求めるエンジン

pub mod types;
pub mod error;
pub mod score;
pub mod hierarchy;
pub mod columns;
pub mod roster;
pub mod placement;
pub mod award;
pub mod report;
pub mod export;

pub use types::{CompetitionKind, ContestantEntry, NormalizedEntry, SheetTable};
pub use error::{Error, Result};
pub use score::{normalize_score, NormalizedScore};
pub use hierarchy::ClassHierarchy;
pub use columns::{Column, ColumnMap};
pub use roster::Roster;
pub use placement::{class_placements, Placement, PLACEMENT_COUNT};
pub use award::{award_catalog, resolve_award, AwardDefinition, Eligibility, WinnerSet};
pub use report::{resolve_trial, AwardResult, ClassResult, TrialOptions, TrialReport};
