//! 検索結果の勝率集計
//!
//! 通算・先手番・後手番の3つの勝率を1パスで数えたカウンタから求める。
//! 後手番の勝数・対局数は `win - sente_win`、`total - sente` として導出する。

use serde::Serialize;

use crate::result::GameResult;

/// 勝敗カウンタ。`from_results` でのみ作られ、検索ごとに作り直す。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    total_games: usize,
    win_count: usize,
    sente_count: usize,
    sente_win_count: usize,
}

/// 勝ち数・負け数・勝率
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinLoss {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    /// 0〜100 の百分率。対局数 0 のときは 0。
    pub rate: f64,
}

impl WinLoss {
    fn new(wins: usize, games: usize) -> Self {
        Self {
            games,
            wins,
            losses: games.saturating_sub(wins),
            rate: win_rate(wins, games),
        }
    }

    /// 小数点以下2桁の百分率表記（例: "66.67%"）
    pub fn rate_text(&self) -> String {
        format!("{:.2}%", self.rate)
    }
}

impl Statistics {
    pub fn from_results(results: &[GameResult]) -> Self {
        let mut stats = Self {
            total_games: results.len(),
            ..Self::default()
        };
        for r in results {
            if r.is_win {
                stats.win_count += 1;
            }
            if r.is_sente {
                stats.sente_count += 1;
                if r.is_win {
                    stats.sente_win_count += 1;
                }
            }
        }
        stats
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn win_count(&self) -> usize {
        self.win_count
    }

    pub fn sente_count(&self) -> usize {
        self.sente_count
    }

    pub fn sente_win_count(&self) -> usize {
        self.sente_win_count
    }

    pub fn gote_count(&self) -> usize {
        self.total_games.saturating_sub(self.sente_count)
    }

    pub fn gote_win_count(&self) -> usize {
        self.win_count.saturating_sub(self.sente_win_count)
    }

    pub fn overall(&self) -> WinLoss {
        WinLoss::new(self.win_count, self.total_games)
    }

    pub fn sente(&self) -> WinLoss {
        WinLoss::new(self.sente_win_count, self.sente_count)
    }

    pub fn gote(&self) -> WinLoss {
        WinLoss::new(self.gote_win_count(), self.gote_count())
    }
}

/// 勝率（%）。分母 0 は 0 とする。
pub fn win_rate(wins: usize, games: usize) -> f64 {
    if games == 0 {
        return 0.0;
    }
    wins as f64 / games as f64 * 100.0
}
