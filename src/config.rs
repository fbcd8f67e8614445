use crate::error::{AppError, Result};
use comprobantes_common::endpoints::{DEFAULT_API_BASE_URL, DEFAULT_REPORT_BASE_URL};
use comprobantes_common::{Endpoints, SearchSettings, DEBOUNCE_DELAY, MIN_SEARCH_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const API_URL_ENV: &str = "COMPROBANTES_API_URL";
const REPORT_URL_ENV: &str = "COMPROBANTES_REPORT_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub report_base_url: String,
    pub min_search_length: usize,
    pub debounce_ms: u64,
    /// None は通信ライブラリの既定に任せる
    pub timeout_seconds: Option<u64>,
    pub download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルがなければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("comprobantes").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            report_base_url: DEFAULT_REPORT_BASE_URL.into(),
            min_search_length: MIN_SEARCH_LENGTH,
            debounce_ms: DEBOUNCE_DELAY.as_millis() as u64,
            timeout_seconds: None,
            download_dir: None,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("api_base_url", &self.api_base_url),
            ("report_base_url", &self.report_base_url),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(AppError::Config(format!("{} が不正です: {}", name, value)));
            }
        }
        if self.min_search_length == 0 {
            return Err(AppError::Config("min_search_length は1以上にしてください".into()));
        }
        Ok(())
    }

    /// 環境変数を優先
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api_base_url.clone())
    }

    pub fn report_base_url(&self) -> String {
        std::env::var(REPORT_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.report_base_url.clone())
    }

    pub fn endpoints(&self) -> Endpoints {
        self.endpoints_for(None)
    }

    /// 優先順位: コマンドライン引数 → 環境変数 → 設定ファイル
    pub fn endpoints_for(&self, api_url: Option<&str>) -> Endpoints {
        let api_base = match api_url {
            Some(url) => url.to_string(),
            None => self.api_base_url(),
        };
        Endpoints::new(&api_base, &self.report_base_url())
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            min_length: self.min_search_length,
            debounce_ms: self.debounce_ms,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// 保存先: 設定値 → OSのダウンロードフォルダ → カレント
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
