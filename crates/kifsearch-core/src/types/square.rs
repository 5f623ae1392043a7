//! 升目（Square）
//!
//! 盤面 UI のグリッド位置 `(row, col)` を基準に、表示用の筋・段と
//! 検索プロトコルで使うマス番号 `c` の3系統の座標を相互変換する。
//!
//! - `row`: 0 が盤の上端（1段目）、8 が下端（9段目）
//! - `col`: 0 が盤の左端（9筋）、8 が右端（1筋）
//! - 表示座標: `x = 9 - col`（筋）、`y = row + 1`（段）
//! - マス番号: `c = 1 + 9 * row + col`（1〜81、行優先）

use std::fmt;

/// 盤上の1マス
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// マスの数
    pub const NUM: usize = 81;

    /// 1辺のマス数
    pub const SIDE: u8 = 9;

    /// グリッド位置から生成する（範囲外は `None`）
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < Self::SIDE && col < Self::SIDE {
            Some(Square(row * Self::SIDE + col))
        } else {
            None
        }
    }

    /// 表示座標（筋 x, 段 y。ともに 1〜9）から生成する
    #[inline]
    pub const fn from_display(x: u8, y: u8) -> Option<Square> {
        if x == 0 || x > Self::SIDE || y == 0 || y > Self::SIDE {
            return None;
        }
        Square::new(y - 1, Self::SIDE - x)
    }

    /// マス番号 `c`（1〜81）から生成する
    #[inline]
    pub const fn from_index(c: u8) -> Option<Square> {
        if c >= 1 && c as usize <= Self::NUM {
            Some(Square(c - 1))
        } else {
            None
        }
    }

    /// 全マスを行優先（マス番号順）で列挙する
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / Self::SIDE
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % Self::SIDE
    }

    /// 筋（9〜1、左から右へ減少）
    #[inline]
    pub const fn display_x(self) -> u8 {
        Self::SIDE - self.col()
    }

    /// 段（1〜9）
    #[inline]
    pub const fn display_y(self) -> u8 {
        self.row() + 1
    }

    /// 検索プロトコルのマス番号（1〜81）
    #[inline]
    pub const fn index(self) -> u8 {
        self.0 + 1
    }

    /// 配列アクセス用（0〜80）
    #[inline]
    pub const fn offset(self) -> usize {
        self.0 as usize
    }

    /// 棋譜表記（例: "７六"）
    pub fn kanji_label(self) -> String {
        const FILES: [&str; 9] = ["１", "２", "３", "４", "５", "６", "７", "８", "９"];
        const RANKS: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];
        format!(
            "{}{}",
            FILES[(self.display_x() - 1) as usize],
            RANKS[(self.display_y() - 1) as usize]
        )
    }
}

impl fmt::Display for Square {
    /// 算用数字2桁の表示座標（例: "76"）
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.display_x(), self.display_y())
    }
}
