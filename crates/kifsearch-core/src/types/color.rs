//! 手番（Color）

/// 手番（先手/後手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Sente = 0,
    Gote = 1,
}

impl Color {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Sente => Color::Gote,
            Color::Gote => Color::Sente,
        }
    }

    /// 手数から指した側を求める（1手目は先手）
    #[inline]
    pub const fn mover_at(ply: u32) -> Color {
        if ply % 2 == 1 { Color::Sente } else { Color::Gote }
    }

    /// 表示用の記号（☗/☖）
    pub const fn mark(self) -> &'static str {
        match self {
            Color::Sente => "☗",
            Color::Gote => "☖",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Color::Sente => "先手",
            Color::Gote => "後手",
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}
