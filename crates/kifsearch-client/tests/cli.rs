//! kifsearch バイナリのサブコマンド（通信しないもの）

use std::path::Path;
use std::process::{Command, Output};

const KIF: &str = "\
開始日時：2025/07/10 11:28:32
手合割：平手
先手：Ringosky
後手：opponent
   1 ７六歩(77)
   2 ３四歩(33)
   3 投了
";

fn kifsearch(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kifsearch"))
        .args(args)
        .current_dir(cwd)
        .env_remove("KIFSEARCH_ENDPOINT")
        .env_remove("KIFSEARCH_TIMEOUT_SECS")
        .output()
        .expect("Failed to run kifsearch")
}

#[test]
fn test_header_command() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("game.kif"), KIF).unwrap();

    let out = kifsearch(&["header", "game.kif"], dir.path());
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("先手: Ringosky"));
    assert!(stdout.contains("開始日時: 2025-07-10 11:28:32"));
    assert!(stdout.contains("手数: 2"));
    assert!(stdout.contains("結果: 後手の勝ち"));
}

#[test]
fn test_from_kif_prints_conditions_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("game.kif"), KIF).unwrap();

    let out = kifsearch(&["from-kif", "game.kif", "--ply", "1", "--json"], dir.path());
    assert!(out.status.success());
    let items: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 40);
    assert!(items.iter().any(|c| c["c"] == "48" && c["sfen"] == "P"));
}

#[test]
fn test_view_writes_slot_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("game.kif"), KIF).unwrap();

    let out = kifsearch(&["view", "--slot", "03", "game.kif", "--out-dir", "out"], dir.path());
    assert!(out.status.success());
    let html = std::fs::read_to_string(dir.path().join("out/preview-board-03.html")).unwrap();
    assert!(html.contains("先手：Ringosky"));
}

#[test]
fn test_bad_placement_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = kifsearch(&["search", "--place", "00:P"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("00:P"));
}
