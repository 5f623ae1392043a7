//! 棋譜検索サービスのクライアント
//!
//! HTTP の検索バックエンド、設定の読み込み、ビューア HTML の書き出しを持つ。
//! 盤面・集計のロジックは `kifsearch_core` 側にある。

pub mod config;
pub mod error;
pub mod http;
pub mod sink;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpSearchClient;
pub use sink::HtmlFileSink;
