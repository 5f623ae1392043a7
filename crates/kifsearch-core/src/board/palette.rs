//! 駒台（パレット）
//!
//! 盤面へのコピー元。パレットからドラッグしても駒は減らない。

use super::PieceToken;
use crate::types::{Color, PieceCode, PieceType};

/// 先手・後手それぞれ全駒種を1つずつ持つ固定パレット
#[derive(Debug, Clone)]
pub struct Palette {
    tokens: Vec<PieceToken>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        let tokens = [Color::Sente, Color::Gote]
            .into_iter()
            .flat_map(|color| {
                PieceType::ALL
                    .into_iter()
                    .map(move |pt| PieceToken::upright_for(PieceCode::new(pt, color)))
            })
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[PieceToken] {
        &self.tokens
    }

    /// 駒コードに対応するパレットの駒を複製して返す
    pub fn token_for(&self, code: PieceCode) -> PieceToken {
        self.tokens
            .iter()
            .find(|t| t.code == code)
            .cloned()
            .unwrap_or_else(|| PieceToken::upright_for(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_both_sides() {
        let palette = Palette::new();
        assert_eq!(palette.tokens().len(), 16);
        assert!(palette.tokens().iter().filter(|t| t.rotated).all(|t| t.code.color == Color::Gote));
        assert_eq!(palette.tokens().iter().filter(|t| t.rotated).count(), 8);
    }

    #[test]
    fn test_token_for() {
        let palette = Palette::new();
        let code = PieceCode::new(PieceType::Knight, Color::Gote);
        let t = palette.token_for(code);
        assert_eq!(t.sfen(), "n");
        assert_eq!(t.glyph, "桂");
        assert!(t.rotated);
    }
}
