//! 棋譜ヘッダ（対局者・日時・結果）の解析

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::moves::{GameOutcome, parse_moves};
use crate::types::Color;

static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"まで\d+手で(?P<side>先手|後手|下手|上手)の(?P<result>勝ち|反則勝ち|反則負け)")
        .expect("valid regex")
});

/// 棋譜ヘッダ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KifHeader {
    pub sente_player: String,
    pub gote_player: String,
    /// "YYYY-MM-DD HH:MM:SS" に正規化した開始日時
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    /// 手合割（"平手" など）
    pub handicap: Option<String>,
    pub outcome: Option<GameOutcome>,
}

impl KifHeader {
    pub fn is_even_game(&self) -> bool {
        self.handicap.as_deref().is_none_or(|h| h == "平手")
    }
}

/// ヘッダ行と終局行から `KifHeader` を作る
pub fn parse_header(kif_text: &str) -> KifHeader {
    let mut header = KifHeader::default();

    for line in kif_text.lines() {
        let Some((key, value)) = split_header_line(line) else {
            continue;
        };
        match key {
            "先手" | "下手" => header.sente_player = value.to_string(),
            "後手" | "上手" => header.gote_player = value.to_string(),
            "開始日時" => header.started_at = Some(normalize_datetime(value)),
            "終了日時" => header.ended_at = Some(normalize_datetime(value)),
            "手合割" => header.handicap = Some(value.to_string()),
            _ => {}
        }
    }

    header.outcome = detect_outcome(kif_text);
    header
}

fn split_header_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end();
    if line.starts_with('*') || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('：').or_else(|| line.split_once(':'))?;
    let key = key.trim();
    if key.is_empty() || key.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((key, value.trim()))
}

/// "2025/07/10 11:28:32" → "2025-07-10 11:28:32"。解釈できない形式は区切りだけ置き換える。
pub fn normalize_datetime(value: &str) -> String {
    const DATETIME_FORMATS: [&str; 4] =
        ["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    let value = value.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y/%m/%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    value.replace('/', "-")
}

// 最後の指し手行が終局表記ならそれを優先し、なければ「まで○手で…」行を見る
fn detect_outcome(kif_text: &str) -> Option<GameOutcome> {
    let moves = parse_moves(kif_text);
    if let Some((last, termination)) = moves.last().and_then(|m| Some((m, m.termination()?))) {
        return Some(termination.outcome(last.mover()));
    }

    let caps = SUMMARY_LINE.captures_iter(kif_text).last()?;
    let side = match &caps["side"] {
        "先手" | "下手" => Color::Sente,
        _ => Color::Gote,
    };
    let winner = match &caps["result"] {
        "反則負け" => !side,
        _ => side,
    };
    Some(GameOutcome::winner(winner))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIF: &str = "\
# ---- 棋譜ファイル ----
開始日時：2025/07/10 11:28:32
終了日時：2025/07/10 11:50:01
手合割：平手
先手：Ringosky
後手：opponent
手数----指手---------消費時間--
   1 ７六歩(77)   ( 0:01/00:00:01)
   2 ３四歩(33)   ( 0:02/00:00:02)
   3 投了         ( 0:03/00:00:04)
まで2手で後手の勝ち
";

    #[test]
    fn test_parse_header() {
        let header = parse_header(KIF);
        assert_eq!(header.sente_player, "Ringosky");
        assert_eq!(header.gote_player, "opponent");
        assert_eq!(header.started_at.as_deref(), Some("2025-07-10 11:28:32"));
        assert_eq!(header.ended_at.as_deref(), Some("2025-07-10 11:50:01"));
        assert!(header.is_even_game());
        // 3手目（先手番）で投了
        assert_eq!(header.outcome, Some(GameOutcome::GoteWin));
    }

    #[test]
    fn test_even_ply_resignation_is_sente_win() {
        let text = "先手：a\n後手：b\n   1 ７六歩(77)\n   2 投了\n";
        assert_eq!(parse_header(text).outcome, Some(GameOutcome::SenteWin));
    }

    #[test]
    fn test_summary_line_fallback() {
        let text = "先手：a\n後手：b\n   1 ７六歩(77)\nまで1手で先手の勝ち\n";
        assert_eq!(parse_header(text).outcome, Some(GameOutcome::SenteWin));

        let text = "先手：a\n後手：b\n   1 ７六歩(77)\nまで1手で先手の反則負け\n";
        assert_eq!(parse_header(text).outcome, Some(GameOutcome::GoteWin));

        assert_eq!(parse_header("先手：a\n").outcome, None);
    }

    #[test]
    fn test_handicap_players() {
        let text = "手合割：香落ち\n上手：uwate_player\n下手：shitate_player\n";
        let header = parse_header(text);
        assert!(!header.is_even_game());
        assert_eq!(header.sente_player, "shitate_player");
        assert_eq!(header.gote_player, "uwate_player");
    }

    #[test]
    fn test_normalize_datetime() {
        assert_eq!(normalize_datetime("2024/01/02 03:04:05"), "2024-01-02 03:04:05");
        assert_eq!(normalize_datetime("2024/01/02 03:04"), "2024-01-02 03:04:00");
        assert_eq!(normalize_datetime("2024/01/02"), "2024-01-02");
        assert_eq!(normalize_datetime("2024/01/02(火) 03:04:05"), "2024-01-02(火) 03:04:05");
    }
}
