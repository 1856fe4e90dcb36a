//! 設定
//!
//! `<config_dir>/xo/config.json` を読み込み、組み込みの既定値に上書きする

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// タブ幅の既定値
pub const DEFAULT_TAB_SIZE: usize = 8;

/// 検索履歴の既定保持数
pub const DEFAULT_HISTORY_LIMIT: usize = 128;

const DEFAULT_TABS_KEY: &str = "default";

/// ファイル種別ごとのタブ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSetting {
    /// タブストップの間隔
    pub size: usize,
    /// 編集行を保存時にタブへ戻すか（Makefile など）
    pub must_retab: bool,
}

impl TabSetting {
    pub const fn new(size: usize, must_retab: bool) -> Self {
        Self { size, must_retab }
    }
}

impl Default for TabSetting {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_SIZE, false)
    }
}

/// エディタ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// ファイル名の末尾 → タブ設定
    pub tabs: BTreeMap<String, TabSetting>,
    /// ハイライトのテーマ名
    pub style: String,
    /// 正規表現・置換文字列の履歴保持数
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let mut tabs = BTreeMap::new();
        tabs.insert(DEFAULT_TABS_KEY.to_string(), TabSetting::default());
        tabs.insert("Makefile".to_string(), TabSetting::new(DEFAULT_TAB_SIZE, true));
        tabs.insert("tsv".to_string(), TabSetting::new(DEFAULT_TAB_SIZE, true));

        Self {
            tabs,
            style: "default".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// 設定ファイルの既定パス
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("xo").join("config.json"))
    }

    /// 既定パスから読み込み（ファイルがなければ既定値）
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 指定パスから読み込み
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|err| match err {
            crate::error::XoError::Config(ConfigError::InvalidFile { message, .. }) => {
                ConfigError::InvalidFile {
                    path: path.display().to_string(),
                    message,
                }
                .into()
            }
            other => other,
        })
    }

    /// JSON 文字列から構築し、既定のタブ表へマージする
    pub fn from_json(content: &str) -> Result<Self> {
        let parsed: EditorConfig =
            serde_json::from_str(content).map_err(|err| ConfigError::InvalidFile {
                path: "<inline>".to_string(),
                message: err.to_string(),
            })?;

        let mut config = Self::default();
        config.tabs.extend(parsed.tabs);
        config.style = parsed.style;
        config.history_limit = parsed.history_limit;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some((key, _)) = self.tabs.iter().find(|(_, tab)| tab.size == 0) {
            return Err(ConfigError::InvalidValue {
                key: format!("tabs.{}", key),
                value: "0".to_string(),
            }
            .into());
        }
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "history_limit".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// ファイル名に最も長く一致する末尾のタブ設定
    pub fn tab_setting_for(&self, path: &Path) -> TabSetting {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.tabs
            .iter()
            .filter(|(suffix, _)| suffix.as_str() != DEFAULT_TABS_KEY && name.ends_with(suffix.as_str()))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, tab)| *tab)
            .or_else(|| self.tabs.get(DEFAULT_TABS_KEY).copied())
            .unwrap_or_default()
    }
}
