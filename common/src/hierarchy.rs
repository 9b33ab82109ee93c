//! クラス階層モジュール
//!
//! 設定で与えられたクラス名トークンの並び（格上が先頭）から
//! クラスの格付け順位を求める。順位は合算賞の同点決着にのみ使う。

use serde::{Deserialize, Serialize};

/// 既定のクラス階層
pub const DEFAULT_CLASS_HIERARCHY: [&str; 3] = ["utility", "open", "novice"];

/// クラス階層（格上が先頭）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassHierarchy {
    tokens: Vec<String>,
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_HIERARCHY)
    }
}

impl ClassHierarchy {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// クラス名の順位を取得
    ///
    /// 大文字小文字を無視して部分一致した最初のトークンの位置 `i` について
    /// `len - i` を返す。どれにも一致しなければ0。
    pub fn rank(&self, class_name: &str) -> u32 {
        let class_name = class_name.to_lowercase();
        self.tokens
            .iter()
            .position(|token| {
                let token = token.trim().to_lowercase();
                !token.is_empty() && class_name.contains(&token)
            })
            .map(|index| (self.tokens.len() - index) as u32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hierarchy_ranks() {
        let hierarchy = ClassHierarchy::default();
        assert_eq!(hierarchy.rank("Utility B"), 3);
        assert_eq!(hierarchy.rank("Open B"), 2);
        assert_eq!(hierarchy.rank("Novice A"), 1);
    }

    #[test]
    fn test_unknown_class_is_lowest() {
        let hierarchy = ClassHierarchy::default();
        assert_eq!(hierarchy.rank("Graduate Novice"), 1);
        assert_eq!(hierarchy.rank("Rally Master"), 0);
        assert_eq!(hierarchy.rank("Versatility"), 0);
        assert_eq!(hierarchy.rank(""), 0);
    }

    /// 部分一致なので "preferred open" も open として扱われる
    #[test]
    fn test_substring_overlap() {
        let hierarchy = ClassHierarchy::default();
        assert_eq!(hierarchy.rank("Preferred Open"), 2);
    }

    #[test]
    fn test_first_matching_token_wins() {
        let hierarchy = ClassHierarchy::new(["rally master", "rally excellent", "rally"]);
        assert_eq!(hierarchy.rank("Rally Master"), 3);
        assert_eq!(hierarchy.rank("Rally Excellent B"), 2);
        assert_eq!(hierarchy.rank("Rally Novice A"), 1);
    }

    #[test]
    fn test_serde_transparent() {
        let hierarchy: ClassHierarchy = serde_json::from_str(r#"["Open", "Novice"]"#).unwrap();
        assert_eq!(hierarchy.len(), 2);
        assert_eq!(hierarchy.rank("open b"), 2);
        assert_eq!(serde_json::to_string(&hierarchy).unwrap(), r#"["Open","Novice"]"#);
    }
}
