//! 部分局面による棋譜検索のクライアント側ロジック
//!
//! - [`board`]: 検索条件を組み立てる盤面とドラッグ操作
//! - [`condition`]: 検索条件のシリアライズ
//! - [`search`]: 検索の実行と結果表示の状態
//! - [`stats`] / [`report`]: 勝率の集計と表示
//! - [`kif`]: 棋譜ファイルの読み込みと盤面再生

pub mod board;
pub mod condition;
pub mod error;
pub mod kif;
pub mod report;
pub mod result;
pub mod search;
pub mod stats;
pub mod types;

pub use condition::{ConditionJson, SearchCondition};
pub use error::{ConditionError, KifError, SearchError, TransferError};
pub use report::SearchReport;
pub use result::GameResult;
pub use search::{SearchBackend, SearchController};
pub use stats::Statistics;
