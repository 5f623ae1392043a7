//! ビューア HTML をファイルに書き出すシンク

use std::fs;
use std::path::{Path, PathBuf};

use kifsearch_core::kif::{ViewerSink, ViewerSlot, render_viewer_document};
use log::info;

/// `<out_dir>/preview-board-<id>.html` に書き出す
#[derive(Debug, Clone)]
pub struct HtmlFileSink {
    out_dir: PathBuf,
}

impl HtmlFileSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn path_for(&self, slot: ViewerSlot) -> PathBuf {
        self.out_dir.join(format!("preview-board-{}.html", slot.id()))
    }
}

impl ViewerSink for HtmlFileSink {
    fn embed(&mut self, slot: ViewerSlot, kif_text: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.path_for(slot);
        fs::write(&path, render_viewer_document(kif_text))?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kifsearch_core::kif::KifIngest;

    #[test]
    fn test_writes_one_file_per_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = HtmlFileSink::new(dir.path().join("viewer"));

        KifIngest::ingest(ViewerSlot::One, "先手：a\n".as_bytes(), &mut sink).unwrap();
        KifIngest::ingest(ViewerSlot::Three, "先手：c\n".as_bytes(), &mut sink).unwrap();

        let one = fs::read_to_string(sink.path_for(ViewerSlot::One)).unwrap();
        assert!(one.contains("先手：a"));
        assert!(sink.path_for(ViewerSlot::Three).exists());
        assert!(!sink.path_for(ViewerSlot::Two).exists());
        assert!(sink.path_for(ViewerSlot::Two).ends_with("preview-board-02.html"));
    }

    #[test]
    fn test_overwrite_same_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = HtmlFileSink::new(dir.path());
        sink.embed(ViewerSlot::Two, "old").unwrap();
        sink.embed(ViewerSlot::Two, "new").unwrap();
        let html = fs::read_to_string(sink.path_for(ViewerSlot::Two)).unwrap();
        assert!(html.contains(">new</script>"));
        assert!(!html.contains(">old</script>"));
    }
}
