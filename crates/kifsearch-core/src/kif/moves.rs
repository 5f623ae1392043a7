//! 棋譜の指し手行と終局判定

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Color;

// 手数と指し手（"同　歩(23)" のように全角空白を挟む表記も拾う）
static MOVE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<ply>\d+)\s+(?P<same>同\s*)?(?P<body>\S+)").expect("valid regex")
});

/// 棋譜の1手
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KifMove {
    pub ply: u32,
    /// 消費時間を除いた指し手表記（例: "７六歩(77)"、"同歩(23)"、"投了"）
    pub notation: String,
}

/// 終局の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Resign,
    Mated,
    TimeUp,
    IllegalLoss,
    IllegalWin,
    EnteringKingWin,
    Repetition,
    Impasse,
    Interrupted,
}

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    SenteWin,
    GoteWin,
    Draw,
    Undecided,
}

impl GameOutcome {
    pub fn winner(color: Color) -> Self {
        match color {
            Color::Sente => GameOutcome::SenteWin,
            Color::Gote => GameOutcome::GoteWin,
        }
    }

    pub fn is_sente_win(self) -> bool {
        self == GameOutcome::SenteWin
    }

    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::SenteWin => "先手の勝ち",
            GameOutcome::GoteWin => "後手の勝ち",
            GameOutcome::Draw => "引き分け",
            GameOutcome::Undecided => "不明",
        }
    }
}

impl Termination {
    pub fn from_notation(notation: &str) -> Option<Self> {
        const TABLE: [(&str, Termination); 11] = [
            ("投了", Termination::Resign),
            ("詰み", Termination::Mated),
            ("切れ負け", Termination::TimeUp),
            ("時間切れ", Termination::TimeUp),
            ("反則負け", Termination::IllegalLoss),
            ("反則勝ち", Termination::IllegalWin),
            ("入玉勝ち", Termination::EnteringKingWin),
            ("宣言勝ち", Termination::EnteringKingWin),
            ("千日手", Termination::Repetition),
            ("持将棋", Termination::Impasse),
            ("中断", Termination::Interrupted),
        ];
        TABLE
            .iter()
            .find(|(keyword, _)| notation.starts_with(keyword))
            .map(|&(_, t)| t)
    }

    /// `mover` はこの終局行の手番（その手数を指すはずだった側）
    pub fn outcome(self, mover: Color) -> GameOutcome {
        match self {
            Termination::Resign
            | Termination::Mated
            | Termination::TimeUp
            | Termination::IllegalLoss => GameOutcome::winner(!mover),
            Termination::IllegalWin | Termination::EnteringKingWin => GameOutcome::winner(mover),
            Termination::Repetition | Termination::Impasse => GameOutcome::Draw,
            Termination::Interrupted => GameOutcome::Undecided,
        }
    }
}

impl KifMove {
    pub fn termination(&self) -> Option<Termination> {
        Termination::from_notation(&self.notation)
    }

    /// 手数から求めた手番（平手で1手目は先手）
    pub fn mover(&self) -> Color {
        Color::mover_at(self.ply)
    }
}

/// 本譜の指し手行を読み出す。変化（"変化："以降）は読まない。
pub fn parse_moves(text: &str) -> Vec<KifMove> {
    let mut moves = Vec::new();
    for line in text.lines() {
        if line.starts_with("変化：") {
            break;
        }
        let Some(caps) = MOVE_LINE.captures(line) else {
            continue;
        };
        let Ok(ply) = caps["ply"].parse::<u32>() else {
            continue;
        };
        let body = &caps["body"];
        let notation = if caps.name("same").is_some() {
            format!("同{body}")
        } else {
            body.to_string()
        };
        moves.push(KifMove { ply, notation });
    }
    moves
}
