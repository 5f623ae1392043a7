//! 棋譜ファイルの文字コード判定
//!
//! UTF-8（BOM 付きも可）→ Shift_JIS → EUC-JP の順に試し、
//! 最初に誤りなくデコードできたものを採用する。

use std::path::Path;

use encoding_rs::{EUC_JP, Encoding, SHIFT_JIS, UTF_8};
use log::debug;

use crate::error::KifError;

/// デコード済みの棋譜テキスト
#[derive(Debug, Clone)]
pub struct DecodedKif {
    pub text: String,
    pub encoding: &'static Encoding,
}

pub fn decode_kif_bytes(bytes: &[u8]) -> Result<DecodedKif, KifError> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return Ok(DecodedKif {
            text: text.into_owned(),
            encoding: UTF_8,
        });
    }

    for encoding in [SHIFT_JIS, EUC_JP] {
        let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
        if !had_errors {
            debug!("kif decoded as {}", encoding.name());
            return Ok(DecodedKif {
                text: text.into_owned(),
                encoding,
            });
        }
    }

    Err(KifError::UnknownEncoding)
}

/// ファイル全体を読み込んでからデコードする
pub fn read_kif_file(path: &Path) -> Result<DecodedKif, KifError> {
    let bytes = std::fs::read(path).map_err(|source| KifError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_kif_bytes(&bytes)
}
