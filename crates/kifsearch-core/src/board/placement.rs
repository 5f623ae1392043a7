//! 盤面上の駒配置

use crate::types::{Color, PieceCode, Square};

/// 盤上に置かれた駒
///
/// `rotated` は表示専用（180度回転）で、検索条件には含まれない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceToken {
    pub glyph: String,
    pub code: PieceCode,
    pub rotated: bool,
}

impl PieceToken {
    pub fn new(code: PieceCode, rotated: bool) -> Self {
        Self {
            glyph: code.kanji().to_string(),
            code,
            rotated,
        }
    }

    /// 駒コードの手番に合わせて向きを決める（後手は逆さ）
    pub fn upright_for(code: PieceCode) -> Self {
        Self::new(code, code.color == Color::Gote)
    }

    /// 検索プロトコル用の駒コード文字列
    pub fn sfen(&self) -> String {
        self.code.to_string()
    }
}

/// 1マス1駒の配置表。空で始まり、置く・取り除くでのみ変化する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    cells: [Option<PieceToken>; Square::NUM],
}

impl Default for Placement {
    fn default() -> Self {
        Self::new()
    }
}

impl Placement {
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| None),
        }
    }

    pub fn get(&self, sq: Square) -> Option<&PieceToken> {
        self.cells[sq.offset()].as_ref()
    }

    /// 駒を置く。既に駒があれば置き換え、元の駒を返す。
    pub fn place(&mut self, sq: Square, token: PieceToken) -> Option<PieceToken> {
        self.cells[sq.offset()].replace(token)
    }

    pub fn remove(&mut self, sq: Square) -> Option<PieceToken> {
        self.cells[sq.offset()].take()
    }

    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// 駒のあるマスをマス番号順に列挙する
    pub fn iter(&self) -> impl Iterator<Item = (Square, &PieceToken)> {
        Square::all().zip(self.cells.iter()).filter_map(|(sq, cell)| cell.as_ref().map(|t| (sq, t)))
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }
}
