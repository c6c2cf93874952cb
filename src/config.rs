use crate::error::{Result, SheetMatchError};
use serde::{Deserialize, Serialize};
use sheet_match_common::RESULT_FILE_NAME;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// サーバーURLを上書きする環境変数
pub const SERVER_ENV_VAR: &str = "SHEET_MATCH_SERVER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_seconds: u64,
    pub output_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            timeout_seconds: 120,
            output_file_name: RESULT_FILE_NAME.into(),
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
            .ok_or_else(|| SheetMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sheet-match").join("config.json"))
    }

    /// 接続先: `--server` > 環境変数 > 設定ファイル
    pub fn server_url(&self, cli_override: Option<&str>) -> String {
        self.server_url_from(cli_override, std::env::var(SERVER_ENV_VAR).ok())
    }

    fn server_url_from(&self, cli_override: Option<&str>, env: Option<String>) -> String {
        if let Some(url) = cli_override {
            return url.to_string();
        }
        match env {
            Some(url) if !url.trim().is_empty() => url,
            _ => self.server_url.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// 保存先: 指定なしならカレントに既定ファイル名
    pub fn output_path(&self, requested: Option<PathBuf>) -> PathBuf {
        requested.unwrap_or_else(|| PathBuf::from(&self.output_file_name))
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SheetMatchError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.server_url = url;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).expect("読込失敗");
        assert_eq!(config, Config::default());
        assert_eq!(config.output_file_name, "matched_results.xlsx");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            server_url: "http://match.internal:8080".into(),
            timeout_seconds: 30,
            ..Config::default()
        };
        config.save_to(&path).expect("保存失敗");

        let loaded = Config::load_from(&path).expect("読込失敗");
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server_url":"http://example.test"}"#).unwrap();

        let config = Config::load_from(&path).expect("読込失敗");
        assert_eq!(config.server_url, "http://example.test");
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(SheetMatchError::JsonParse(_))
        ));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config::default();
        assert_eq!(
            config.server_url(Some("http://override:1")),
            "http://override:1"
        );
    }

    #[test]
    fn test_env_overrides_saved_url() {
        let config = Config {
            server_url: "http://saved:5000".into(),
            ..Config::default()
        };

        assert_eq!(
            config.server_url_from(None, Some("http://env:7000".into())),
            "http://env:7000"
        );
        assert_eq!(
            config.server_url_from(Some("http://cli:1"), Some("http://env:7000".into())),
            "http://cli:1"
        );
    }

    #[test]
    fn test_blank_env_falls_back_to_saved_url() {
        let config = Config {
            server_url: "http://saved:5000".into(),
            ..Config::default()
        };

        assert_eq!(config.server_url_from(None, Some("  ".into())), "http://saved:5000");
        assert_eq!(config.server_url_from(None, None), "http://saved:5000");
    }

    #[test]
    fn test_output_path() {
        let config = Config::default();
        assert_eq!(config.output_path(None), PathBuf::from("matched_results.xlsx"));
        assert_eq!(
            config.output_path(Some(PathBuf::from("out/result.xlsx"))),
            PathBuf::from("out/result.xlsx")
        );
    }
}
