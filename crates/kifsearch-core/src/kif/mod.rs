//! 棋譜ファイル（KIF）の読み込み
//!
//! 文字コード判定、ヘッダ・指し手の解析、盤面再生、ビューアへの埋め込み。

mod decode;
mod header;
mod moves;
mod replay;
mod viewer;

pub use decode::{DecodedKif, decode_kif_bytes, read_kif_file};
pub use header::{KifHeader, normalize_datetime, parse_header};
pub use moves::{GameOutcome, KifMove, Termination, parse_moves};
pub use replay::{HIRATE_BOARD_SFEN, KifBoard};
pub use viewer::{KifIngest, MemoryViewer, ViewerSink, ViewerSlot, render_viewer_document};

/// ヘッダと本譜の指し手
#[derive(Debug, Clone)]
pub struct KifRecord {
    pub header: KifHeader,
    pub moves: Vec<KifMove>,
}

impl KifRecord {
    pub fn parse(kif_text: &str) -> Self {
        Self {
            header: parse_header(kif_text),
            moves: parse_moves(kif_text),
        }
    }

    /// 終局表記を除いた指し手の数
    pub fn move_count(&self) -> usize {
        self.moves.iter().take_while(|m| m.termination().is_none()).count()
    }

    /// `upto` 手目（`None` なら最終手）の盤面
    pub fn board_at(&self, upto: Option<u32>) -> Result<KifBoard, crate::error::KifError> {
        KifBoard::replay(&self.moves, upto)
    }
}
