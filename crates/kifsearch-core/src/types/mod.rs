//! 座標・手番・駒の基本型

mod color;
mod piece;
mod square;

pub use color::Color;
pub use piece::{PieceCode, PieceType};
pub use square::Square;
