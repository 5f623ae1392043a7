//! 検索 API の HTTP クライアント

use log::{debug, info, warn};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use kifsearch_core::condition::conditions_to_json;
use kifsearch_core::result::decode_results;
use kifsearch_core::{GameResult, SearchBackend, SearchCondition, SearchError};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// `POST <endpoint>` に条件の JSON 配列を送るクライアント
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    endpoint: Url,
}

impl HttpSearchClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let endpoint = config.endpoint_url()?;
        // blocking クライアントは既定で 30 秒のタイムアウトを持つので明示的に上書きする
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SearchBackend for HttpSearchClient {
    fn search(&self, conditions: &[SearchCondition]) -> Result<Vec<GameResult>, SearchError> {
        let body = serde_json::to_string(&conditions_to_json(conditions))
            .map_err(|e| SearchError::Network(format!("encode request body: {e}")))?;
        debug!("POST {} {body}", self.endpoint);

        let res = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            warn!("HTTP {status} from {}", self.endpoint);
            // 本文が読めなくてもステータスは返す
            return Err(SearchError::Request {
                status: status.as_u16(),
                body: res.text().unwrap_or_default(),
            });
        }
        let text = res
            .text()
            .map_err(|e| SearchError::Network(format!("read body: {e}")))?;

        let results = decode_results(&text)?;
        info!("{} results from {}", results.len(), self.endpoint);
        Ok(results)
    }
}
