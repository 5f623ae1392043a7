//! 棋譜ビューアへの埋め込み
//!
//! 3つのプレビュー枠（01/02/03）それぞれに棋譜を読み込む。枠ごとに独立で、
//! 同じ枠への読み込みは後から完了したものが表示を上書きする。

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::info;

use super::decode::decode_kif_bytes;
use crate::error::KifError;

/// プレビュー枠
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewerSlot {
    One,
    Two,
    Three,
}

impl ViewerSlot {
    pub const ALL: [ViewerSlot; 3] = [ViewerSlot::One, ViewerSlot::Two, ViewerSlot::Three];

    pub const fn id(self) -> &'static str {
        match self {
            ViewerSlot::One => "01",
            ViewerSlot::Two => "02",
            ViewerSlot::Three => "03",
        }
    }
}

impl fmt::Display for ViewerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ViewerSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "01" | "1" => Ok(ViewerSlot::One),
            "02" | "2" => Ok(ViewerSlot::Two),
            "03" | "3" => Ok(ViewerSlot::Three),
            other => Err(format!("unknown viewer slot: {other:?} (expected 01, 02 or 03)")),
        }
    }
}

/// 棋譜テキストを受け取って表示する側
pub trait ViewerSink {
    fn embed(&mut self, slot: ViewerSlot, kif_text: &str) -> std::io::Result<()>;
}

/// 棋譜を埋め込んだビューア用 HTML 文書
pub fn render_viewer_document(kif_text: &str) -> String {
    // script 要素を途中で閉じさせない
    let kif_text = kif_text.replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="UTF-8" />
  <title>棋譜ビューア</title>
  <link href="KifPlayer/css/shogistyle.css" rel="stylesheet">
</head>
<body>
  <data class="shogiboard" id="kif" value="kifsearch">
    <svg id="board" xmlns="http://www.w3.org/2000/svg" width="450" height="570" viewBox="0, 0, 450, 570"></svg>
    <script type="kif">{kif_text}</script>
  </data>
  <script src="https://code.jquery.com/jquery-3.2.1.min.js"></script>
  <script src="./KifPlayer/js/kifPlayer.js"></script>
  <script type="text/javascript" src="https://cdnjs.cloudflare.com/ajax/libs/snap.svg/0.4.1/snap.svg.js"></script>
</body>
</html>
"#
    )
}

/// メモリ上に保持するだけのビューア（テスト・プレビュー用）
#[derive(Debug, Default)]
pub struct MemoryViewer {
    documents: BTreeMap<ViewerSlot, String>,
}

impl MemoryViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 枠に表示中の HTML 文書
    pub fn document(&self, slot: ViewerSlot) -> Option<&str> {
        self.documents.get(&slot).map(String::as_str)
    }
}

impl ViewerSink for MemoryViewer {
    fn embed(&mut self, slot: ViewerSlot, kif_text: &str) -> std::io::Result<()> {
        self.documents.insert(slot, render_viewer_document(kif_text));
        Ok(())
    }
}

/// ファイルのバイト列を文字コード判別してビューアに渡す
pub struct KifIngest;

impl KifIngest {
    pub fn ingest<S: ViewerSink + ?Sized>(
        slot: ViewerSlot,
        bytes: &[u8],
        sink: &mut S,
    ) -> Result<(), KifError> {
        let decoded = decode_kif_bytes(bytes)?;
        info!(
            "preview-board-{}: {} ({} bytes)",
            slot.id(),
            decoded.encoding.name(),
            bytes.len()
        );
        sink.embed(slot, &decoded.text).map_err(KifError::Sink)
    }
}
