//! 駒種と駒コード

use std::fmt;
use std::str::FromStr;

use super::Color;
use crate::error::ConditionError;

/// 駒種（成りは検索プロトコルに含まれないため持たない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 8] = [
        PieceType::King,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 先手側のSFEN文字（大文字）
    pub const fn sfen_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Lance => 'L',
            PieceType::Knight => 'N',
            PieceType::Silver => 'S',
            PieceType::Gold => 'G',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::King => 'K',
        }
    }

    pub const fn from_sfen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'L' => Some(PieceType::Lance),
            'N' => Some(PieceType::Knight),
            'S' => Some(PieceType::Silver),
            'G' => Some(PieceType::Gold),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    /// 駒台・盤面に表示する漢字
    pub const fn kanji(self, color: Color) -> &'static str {
        match self {
            PieceType::Pawn => "歩",
            PieceType::Lance => "香",
            PieceType::Knight => "桂",
            PieceType::Silver => "銀",
            PieceType::Gold => "金",
            PieceType::Bishop => "角",
            PieceType::Rook => "飛",
            PieceType::King => match color {
                Color::Sente => "玉",
                Color::Gote => "王",
            },
        }
    }

    /// 棋譜の駒表記から駒種を得る。成駒は元の駒種に戻す。
    pub fn from_kif_label(label: &str) -> Option<PieceType> {
        let label = label.trim_start_matches('成');
        let first = label.chars().next()?;
        match first {
            '歩' | 'と' => Some(PieceType::Pawn),
            '香' | '杏' => Some(PieceType::Lance),
            '桂' | '圭' => Some(PieceType::Knight),
            '銀' | '全' => Some(PieceType::Silver),
            '金' => Some(PieceType::Gold),
            '角' | '馬' => Some(PieceType::Bishop),
            '飛' | '龍' | '竜' => Some(PieceType::Rook),
            '玉' | '王' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// 駒コード（駒種＋手番）。SFEN の1文字表記と1対1に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCode {
    pub piece_type: PieceType,
    pub color: Color,
}

impl PieceCode {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// 先手は大文字、後手は小文字
    pub const fn sfen_char(self) -> char {
        let c = self.piece_type.sfen_char();
        match self.color {
            Color::Sente => c,
            Color::Gote => c.to_ascii_lowercase(),
        }
    }

    pub const fn from_sfen_char(c: char) -> Option<PieceCode> {
        let color = if c.is_ascii_uppercase() {
            Color::Sente
        } else {
            Color::Gote
        };
        match PieceType::from_sfen_char(c) {
            Some(piece_type) => Some(PieceCode::new(piece_type, color)),
            None => None,
        }
    }

    pub const fn kanji(self) -> &'static str {
        self.piece_type.kanji(self.color)
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sfen_char())
    }
}

impl FromStr for PieceCode {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceCode::from_sfen_char(c)
                .ok_or_else(|| ConditionError::InvalidPieceCode(s.to_string())),
            _ => Err(ConditionError::InvalidPieceCode(s.to_string())),
        }
    }
}
