use crate::error::{Result, SkinEvalError};
use serde::{Deserialize, Serialize};
use skin_eval_common::DEFAULT_API_URL;
use std::path::{Path, PathBuf};

/// APIベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "SKIN_EVAL_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SkinEvalError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("skin-eval").join("config.json"))
    }

    /// 実際に使うベースURL（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_api_url(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override.filter(|u| !u.trim().is_empty()) {
            return url.trim().to_string();
        }

        // 環境変数を優先
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url.trim().to_string();
            }
        }

        self.api_url.clone()
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SkinEvalError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.api_url = url;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(SkinEvalError::Config("タイムアウトは1秒以上にしてください".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }
}
