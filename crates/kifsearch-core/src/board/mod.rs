//! 検索条件用の盤面（駒配置・パレット・ドラッグ操作）

mod palette;
mod placement;
mod session;

pub use palette::Palette;
pub use placement::{PieceToken, Placement};
pub use session::{BoardSession, TransferId, TransferOutcome, TransferSource};
