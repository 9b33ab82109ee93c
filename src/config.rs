use crate::error::{AwardsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trial_awards_common::ClassHierarchy;

/// 設定ファイル
///
/// キー名は旧来の settings.json と互換。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "class hierarchy")]
    pub class_hierarchy: ClassHierarchy,
    pub defaults: Defaults,
}

/// 実行時オプションの既定値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Defaults {
    #[serde(rename = "break ties by class")]
    pub break_ties_by_class: bool,
    #[serde(rename = "write to new file")]
    pub write_to_new_file: bool,
}

impl Settings {
    /// 設定を読み込む
    ///
    /// ファイルが無ければ既定値を返す（ファイルは作成しない）。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::settings_path()?,
        };

        if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            let settings: Settings = serde_json::from_str(&content)?;
            tracing::debug!(path = %settings_path.display(), "settings loaded");
            Ok(settings)
        } else {
            tracing::debug!(path = %settings_path.display(), "settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let settings_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::settings_path()?,
        };

        if let Some(parent) = settings_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&settings_path, content)?;
        Ok(settings_path)
    }

    pub fn settings_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AwardsError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("trial-awards").join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.class_hierarchy.tokens(), ["utility", "open", "novice"]);
        assert!(!settings.defaults.break_ties_by_class);
        assert!(!settings.defaults.write_to_new_file);
    }

    #[test]
    fn test_legacy_keys() {
        let json = r#"{"class hierarchy": ["utility", "open"], "defaults": {"break ties by class": true, "write to new file": false}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.class_hierarchy.len(), 2);
        assert!(settings.defaults.break_ties_by_class);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"defaults": {}}"#).unwrap();
        assert_eq!(settings.class_hierarchy, ClassHierarchy::default());
        assert!(!settings.defaults.write_to_new_file);
    }

    #[test]
    fn test_missing_file_is_not_created() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("settings.json");

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.defaults.write_to_new_file = true;
        settings.save(Some(&path)).unwrap();

        let loaded = Settings::load(Some(&path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ invalid").unwrap();

        assert!(matches!(Settings::load(Some(&path)), Err(AwardsError::JsonParse(_))));
    }
}
