//! 棋譜の盤面再生
//!
//! 平手初期局面から指し手を順に適用し、任意の手数の盤面を得る。
//! 持ち駒と成りは追跡しない（検索条件の盤面表現に合わせる）。

use std::sync::LazyLock;

use regex::Regex;

use super::moves::KifMove;
use crate::board::{PieceToken, Placement};
use crate::condition::{SearchCondition, serialize_conditions};
use crate::error::KifError;
use crate::types::{PieceCode, PieceType, Square};

/// 平手初期局面（SFEN の盤面部分）
pub const HIRATE_BOARD_SFEN: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL";

static MOVE_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<file>[1-9１-９])(?P<rank>[一二三四五六七八九])|(?P<same>同))(?P<piece>成?[歩香桂銀金角飛玉王と杏圭全馬龍竜])(?P<rest>.*)$",
    )
    .expect("valid regex")
});

static ORIGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<file>[1-9])(?P<rank>[1-9])\)").expect("valid regex"));

/// 再生用の盤面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KifBoard {
    squares: [Option<PieceCode>; Square::NUM],
    last_to: Option<Square>,
}

impl Default for KifBoard {
    fn default() -> Self {
        Self::hirate()
    }
}

impl KifBoard {
    pub fn empty() -> Self {
        Self {
            squares: [None; Square::NUM],
            last_to: None,
        }
    }

    pub fn hirate() -> Self {
        // 定数なので失敗しない
        Self::from_sfen_board(HIRATE_BOARD_SFEN).unwrap_or_else(Self::empty)
    }

    /// SFEN の盤面部分（成駒 `+` なし）を読む。段ごとに9筋→1筋の順。
    pub fn from_sfen_board(sfen: &str) -> Option<Self> {
        let mut board = Self::empty();
        let ranks: Vec<&str> = sfen.split('/').collect();
        if ranks.len() != 9 {
            return None;
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0u8;
            for ch in rank.chars() {
                if let Some(n) = ch.to_digit(10) {
                    col = col.checked_add(n as u8)?;
                    continue;
                }
                let code = PieceCode::from_sfen_char(ch)?;
                let sq = Square::new(row as u8, col)?;
                board.squares[sq.offset()] = Some(code);
                col += 1;
            }
            if col != 9 {
                return None;
            }
        }
        Some(board)
    }

    pub fn get(&self, sq: Square) -> Option<PieceCode> {
        self.squares[sq.offset()]
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    /// 1手適用する。終局表記は呼び出し側で除いておくこと。
    pub fn apply(&mut self, mv: &KifMove) -> Result<(), KifError> {
        let invalid = |reason: &str| KifError::InvalidMove {
            ply: mv.ply,
            notation: mv.notation.clone(),
            reason: reason.to_string(),
        };

        let caps = MOVE_NOTATION
            .captures(&mv.notation)
            .ok_or_else(|| invalid("unrecognized notation"))?;

        let to = if caps.name("same").is_some() {
            self.last_to.ok_or_else(|| invalid("同 without a previous move"))?
        } else {
            let file = digit_value(&caps["file"]).ok_or_else(|| invalid("bad file"))?;
            let rank = rank_value(&caps["rank"]).ok_or_else(|| invalid("bad rank"))?;
            Square::from_display(file, rank).ok_or_else(|| invalid("destination out of board"))?
        };

        let rest = &caps["rest"];
        if rest.contains('打') {
            let piece_type =
                PieceType::from_kif_label(&caps["piece"]).ok_or_else(|| invalid("unknown piece"))?;
            if self.squares[to.offset()].is_some() {
                return Err(invalid("drop onto an occupied square"));
            }
            self.squares[to.offset()] = Some(PieceCode::new(piece_type, mv.mover()));
        } else {
            let origin = ORIGIN.captures(rest).ok_or_else(|| invalid("missing origin"))?;
            let from = digit_value(&origin["file"])
                .zip(digit_value(&origin["rank"]))
                .and_then(|(x, y)| Square::from_display(x, y))
                .ok_or_else(|| invalid("bad origin"))?;
            let piece = self.squares[from.offset()]
                .take()
                .ok_or_else(|| invalid("no piece at origin"))?;
            self.squares[to.offset()] = Some(piece);
        }

        self.last_to = Some(to);
        Ok(())
    }

    /// 平手初期局面から `upto` 手目まで（`None` なら終局まで）再生する
    pub fn replay(moves: &[KifMove], upto: Option<u32>) -> Result<Self, KifError> {
        let mut board = Self::hirate();
        for mv in moves {
            if upto.is_some_and(|limit| mv.ply > limit) || mv.termination().is_some() {
                break;
            }
            board.apply(mv)?;
        }
        Ok(board)
    }

    /// 検索条件用の配置に変換する
    pub fn to_placement(&self) -> Placement {
        let mut placement = Placement::new();
        for (sq, code) in Square::all().zip(self.squares.iter()) {
            if let Some(code) = code {
                placement.place(sq, PieceToken::upright_for(*code));
            }
        }
        placement
    }

    pub fn conditions(&self) -> Vec<SearchCondition> {
        serialize_conditions(&self.to_placement())
    }
}

fn digit_value(s: &str) -> Option<u8> {
    let c = s.chars().next()?;
    match c {
        '1'..='9' => Some(c as u8 - b'0'),
        '１'..='９' => Some((c as u32 - '１' as u32 + 1) as u8),
        _ => None,
    }
}

fn rank_value(s: &str) -> Option<u8> {
    const RANKS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];
    let c = s.chars().next()?;
    RANKS.iter().position(|&r| r == c).map(|i| i as u8 + 1)
}
