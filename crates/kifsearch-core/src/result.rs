//! 検索結果（1局分）とレスポンスの型付きデコード

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// 検索 API が返す1局分の結果
///
/// `is_win` / `is_sente` は検索した側（自分）から見た値。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// 条件に一致した最初の手数
    pub te: i32,
    pub is_win: bool,
    pub is_sente: bool,
    /// 対局開始日時（"2025-07-10 11:28:32" 形式）。サーバー側で不明なら null。
    #[serde(default)]
    pub started_at: Option<String>,
    pub link: String,
}

impl GameResult {
    /// リンク URL の最後の `/` より後ろ（表示用のファイル名）。`/` で終わるなら空文字列。
    pub fn link_name(&self) -> &str {
        self.link.rsplit('/').next().unwrap_or(&self.link)
    }
}

/// レスポンスボディを結果列にデコードする。
///
/// フィールドの欠落や型違いは `MalformedResponse` として扱い、
/// 統計計算まで進めない。
pub fn decode_results(body: &str) -> Result<Vec<GameResult>, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_results() {
        let body = r#"[
            {"te": 32, "is_win": true, "is_sente": false,
             "started_at": "2025-07-10 11:28:32", "link": "/kif/imported/20250710_1128.kif"},
            {"te": 5, "is_win": false, "is_sente": true, "started_at": null,
             "link": "/kif/imported/b.kif", "extra": 1}
        ]"#;
        let results = decode_results(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].te, 32);
        assert!(!results[0].is_sente);
        assert_eq!(results[0].link_name(), "20250710_1128.kif");
        assert_eq!(results[1].started_at, None);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(decode_results("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_bodies() {
        // is_win が欠けている
        let missing = r#"[{"te": 1, "is_sente": true, "started_at": "x", "link": "a"}]"#;
        assert!(matches!(decode_results(missing), Err(SearchError::MalformedResponse(_))));

        // te の型違い
        let wrong = r#"[{"te": "1", "is_win": true, "is_sente": true, "started_at": "x", "link": "a"}]"#;
        assert!(matches!(decode_results(wrong), Err(SearchError::MalformedResponse(_))));

        assert!(matches!(decode_results("<html>"), Err(SearchError::MalformedResponse(_))));
        assert!(matches!(decode_results("{}"), Err(SearchError::MalformedResponse(_))));
    }

    #[test]
    fn test_link_name() {
        let mut r = GameResult {
            te: 1,
            is_win: true,
            is_sente: true,
            started_at: None,
            link: "http://example.com/a/b/c.kif".to_string(),
        };
        assert_eq!(r.link_name(), "c.kif");
        r.link = "plain.kif".to_string();
        assert_eq!(r.link_name(), "plain.kif");
        r.link = "http://example.com/a/".to_string();
        assert_eq!(r.link_name(), "");
    }
}
