//! クライアント設定
//!
//! 既定値 → TOML ファイル → 環境変数 の順に上書きする。
//!
//! ```toml
//! endpoint = "http://localhost:3000/api/search"
//! timeout_secs = 10
//! viewer_out_dir = "viewer"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/search";
pub const DEFAULT_VIEWER_OUT_DIR: &str = "viewer";

pub const ENV_ENDPOINT: &str = "KIFSEARCH_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "KIFSEARCH_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 検索 API の URL
    pub endpoint: String,
    /// リクエストのタイムアウト秒数。未指定または 0 ならタイムアウトなし。
    pub timeout_secs: Option<u64>,
    /// ビューア HTML の出力先
    pub viewer_out_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            viewer_out_dir: PathBuf::from(DEFAULT_VIEWER_OUT_DIR),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ClientError> {
        let content = std::fs::read_to_string(path).map_err(|source| ClientError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ClientError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 設定ファイル（任意）を読み、環境変数で上書きする
    pub fn load(path: Option<&Path>) -> Result<Self, ClientError> {
        let mut config = match path {
            Some(path) => {
                debug!("loading config from {}", path.display());
                Self::from_toml_file(path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// `lookup` で得た値で上書きする（環境変数の読み出しを差し替えられるようにしている）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs = value.trim().parse::<u64>().map_err(|_| ClientError::InvalidEnv {
                name: ENV_TIMEOUT_SECS,
                value: value.clone(),
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|&s| s > 0).map(Duration::from_secs)
    }

    /// `endpoint` を検証して URL にする（http / https のみ）
    pub fn endpoint_url(&self) -> Result<Url, ClientError> {
        let url = Url::parse(&self.endpoint).map_err(|source| ClientError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.viewer_out_dir, PathBuf::from("viewer"));
        assert_eq!(config.endpoint_url().unwrap().path(), "/api/search");
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kifsearch.toml");
        std::fs::write(&path, "timeout_secs = 5\n").unwrap();

        let config = ClientConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_bad_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "endpoint = [").unwrap();
        let err = ClientConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ClientError::ParseConfig { .. }));
        assert!(err.to_string().contains("broken.toml"));

        let err = ClientConfig::from_toml_file(&dir.path().join("none.toml")).unwrap_err();
        assert!(matches!(err, ClientError::ReadConfig { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = ClientConfig::default();
        config
            .apply_overrides(|name| match name {
                ENV_ENDPOINT => Some("https://example.com/api/search".to_string()),
                ENV_TIMEOUT_SECS => Some("0".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.endpoint, "https://example.com/api/search");
        assert_eq!(config.timeout_secs, Some(0));
        assert_eq!(config.timeout(), None);

        let err = config
            .apply_overrides(|name| (name == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidEnv { .. }));
    }

    #[test]
    fn test_endpoint_validation() {
        let mut config = ClientConfig::default();
        config.endpoint = "not a url".to_string();
        assert!(matches!(config.endpoint_url(), Err(ClientError::InvalidEndpoint { .. })));
        config.endpoint = "ftp://example.com/search".to_string();
        assert!(matches!(config.endpoint_url(), Err(ClientError::UnsupportedScheme(_))));
    }
}
