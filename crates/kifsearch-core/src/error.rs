//! エラー型
//!
//! 関心ごとに1つずつ enum を持つ。検索系のエラーは呼び出し側（アプリ）に
//! 返し、表示するかどうかはアプリ側で決める。

use std::path::PathBuf;

/// 盤面への駒移動（ドラッグ＆ドロップ）のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// 移動中の駒データが見つからない（空きマスからの移動、未知の TransferId）
    #[error("transfer data missing: {0}")]
    DataMissing(String),
}

/// 検索条件の解釈エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("invalid square index: {0:?} (expected 1..=81)")]
    InvalidIndex(String),

    #[error("invalid piece code: {0:?}")]
    InvalidPieceCode(String),

    #[error("invalid placement {0:?} (expected XY:CODE, e.g. 76:P)")]
    InvalidPlacement(String),

    #[error("invalid condition JSON: {0}")]
    Json(String),
}

/// 検索 API 呼び出しのエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// 2xx 以外のステータス
    #[error("search request failed: HTTP {status}")]
    Request { status: u16, body: String },

    /// 接続失敗などトランスポート層のエラー
    #[error("search network error: {0}")]
    Network(String),

    /// レスポンス JSON が期待する形をしていない
    #[error("malformed search response: {0}")]
    MalformedResponse(String),
}

/// 棋譜読み込み・解析のエラー
#[derive(Debug, thiserror::Error)]
pub enum KifError {
    #[error("文字コードの自動判別に失敗しました")]
    UnknownEncoding,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("viewer sink failed: {0}")]
    Sink(#[source] std::io::Error),

    #[error("invalid move at ply {ply} ({notation}): {reason}")]
    InvalidMove {
        ply: u32,
        notation: String,
        reason: String,
    },
}
