//! 検索結果の表と集計サマリー

use std::fmt::Write as _;

use serde::Serialize;

use crate::result::GameResult;
use crate::stats::{Statistics, WinLoss};
use crate::types::Color;

/// 一致なしのときの表示文言
pub const NO_MATCH_MESSAGE: &str = "一致する棋譜は見つかりませんでした。";

/// 表に出す対局日時の桁数（"2025-07-10 11:28" まで）
pub const DATE_PREFIX_LEN: usize = 16;

const WIN_MARK: &str = "⭕️";
const LOSS_MARK: &str = "✖︎";

/// 表の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub te: i32,
    pub result_mark: &'static str,
    pub side_mark: &'static str,
    pub date: String,
    pub href: String,
    pub link_text: String,
}

impl ResultRow {
    pub fn from_result(r: &GameResult) -> Self {
        let side = if r.is_sente { Color::Sente } else { Color::Gote };
        Self {
            te: r.te,
            result_mark: if r.is_win { WIN_MARK } else { LOSS_MARK },
            side_mark: side.mark(),
            date: truncate_date(r.started_at.as_deref()),
            href: r.link.clone(),
            link_text: r.link_name().to_string(),
        }
    }
}

/// 集計サマリー（JSON 出力用）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub overall: WinLoss,
    pub sente: WinLoss,
    pub gote: WinLoss,
}

impl From<&Statistics> for Summary {
    fn from(stats: &Statistics) -> Self {
        Self {
            total: stats.total_games(),
            overall: stats.overall(),
            sente: stats.sente(),
            gote: stats.gote(),
        }
    }
}

/// 1回の検索の表示内容
#[derive(Debug, Clone, PartialEq)]
pub enum SearchReport {
    /// 一致なし（エラーではない）
    NoMatches,
    Found {
        rows: Vec<ResultRow>,
        stats: Statistics,
    },
}

#[derive(Serialize)]
struct JsonReport<'a> {
    matched: bool,
    summary: Option<Summary>,
    rows: &'a [ResultRow],
}

impl SearchReport {
    /// 結果列から表と集計を作る。空なら `NoMatches` で、勝率計算は行わない。
    pub fn from_results(results: &[GameResult]) -> Self {
        if results.is_empty() {
            return SearchReport::NoMatches;
        }
        SearchReport::Found {
            rows: results.iter().map(ResultRow::from_result).collect(),
            stats: Statistics::from_results(results),
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        match self {
            SearchReport::NoMatches => &[],
            SearchReport::Found { rows, .. } => rows,
        }
    }

    pub fn stats(&self) -> Option<&Statistics> {
        match self {
            SearchReport::NoMatches => None,
            SearchReport::Found { stats, .. } => Some(stats),
        }
    }

    /// 4行のサマリー。一致なしのときは案内文1行。
    pub fn summary_text(&self) -> String {
        match self {
            SearchReport::NoMatches => NO_MATCH_MESSAGE.to_string(),
            SearchReport::Found { stats, .. } => summary_lines(stats).join("\n"),
        }
    }

    /// CLI 向けのテキスト表＋サマリー
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let SearchReport::Found { rows, .. } = self {
            let _ = writeln!(out, "{:>4}  勝敗  先後  {:16}  棋譜", "手数", "対局日時");
            let _ = writeln!(out, "{}", "=".repeat(60));
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:>6}  {}    {}    {:16}  {}",
                    row.te, row.result_mark, row.side_mark, row.date, row.link_text
                );
            }
            out.push('\n');
        }
        out.push_str(&self.summary_text());
        out.push('\n');
        out
    }

    /// 結果表の HTML 断片。リンクは別タブで開く。
    pub fn render_html(&self) -> String {
        let SearchReport::Found { rows, .. } = self else {
            return format!("<p class=\"result-log\">{}</p>\n", escape_html(NO_MATCH_MESSAGE));
        };
        let mut out = String::from(
            "<table class=\"result-table\">\n<thead><tr><th>手数</th><th>勝敗</th><th>先後</th><th>対局日時</th><th>棋譜</th></tr></thead>\n<tbody>\n",
        );
        for row in rows {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"{}\" target=\"_blank\">{}</a></td></tr>",
                row.te,
                row.result_mark,
                row.side_mark,
                escape_html(&row.date),
                escape_html(&row.href),
                escape_html(&row.link_text)
            );
        }
        out.push_str("</tbody>\n</table>\n");
        let _ = writeln!(
            out,
            "<pre class=\"result-log\">{}</pre>",
            escape_html(&self.summary_text())
        );
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = JsonReport {
            matched: matches!(self, SearchReport::Found { .. }),
            summary: self.stats().map(Summary::from),
            rows: self.rows(),
        };
        serde_json::to_string_pretty(&report)
    }
}

/// 件数・通算・先手番・後手番の4行
pub fn summary_lines(stats: &Statistics) -> [String; 4] {
    let line = |label: &str, wl: WinLoss| {
        format!("{label}: {}勝{}敗 勝率 {}", wl.wins, wl.losses, wl.rate_text())
    };
    [
        format!("一致件数: {}件", stats.total_games()),
        line("通算", stats.overall()),
        line(Color::Sente.label(), stats.sente()),
        line(Color::Gote.label(), stats.gote()),
    ]
}

fn truncate_date(started_at: Option<&str>) -> String {
    match started_at {
        Some(s) if !s.is_empty() => s.chars().take(DATE_PREFIX_LEN).collect(),
        _ => "-".to_string(),
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
