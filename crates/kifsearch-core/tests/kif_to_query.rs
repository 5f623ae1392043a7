//! Shift_JIS の棋譜ファイル → 局面再生 → 検索条件 の流れ

use encoding_rs::SHIFT_JIS;
use kifsearch_core::condition::{conditions_to_json, parse_conditions_json};
use kifsearch_core::kif::{GameOutcome, KifRecord, read_kif_file};

const KIF: &str = "\
# ---- 棋譜ファイル ----
開始日時：2025/07/10 11:28:32
手合割：平手
先手：Ringosky
後手：opponent
手数----指手---------消費時間--
   1 ７六歩(77)   ( 0:01/00:00:01)
   2 ３四歩(33)   ( 0:02/00:00:02)
   3 ２二角成(88) ( 0:03/00:00:04)
   4 同　銀(31)   ( 0:01/00:00:03)
   5 ４五角打     ( 0:05/00:00:09)
   6 投了         ( 0:10/00:00:13)
まで5手で先手の勝ち
";

#[test]
fn test_sjis_file_to_conditions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.kif");
    let (bytes, _, had_errors) = SHIFT_JIS.encode(KIF);
    assert!(!had_errors);
    std::fs::write(&path, &bytes).unwrap();

    let decoded = read_kif_file(&path).unwrap();
    assert_eq!(decoded.encoding, SHIFT_JIS);

    let record = KifRecord::parse(&decoded.text);
    assert_eq!(record.header.sente_player, "Ringosky");
    assert_eq!(record.header.started_at.as_deref(), Some("2025-07-10 11:28:32"));
    assert_eq!(record.header.outcome, Some(GameOutcome::SenteWin));
    assert_eq!(record.move_count(), 5);

    // 1手目の局面: 7六 に先手の歩
    let board = record.board_at(Some(1)).unwrap();
    let json = conditions_to_json(&board.conditions());
    assert_eq!(json.len(), 40);
    assert!(json.iter().any(|c| c.c == "48" && c.sfen == "P"));
    assert!(!json.iter().any(|c| c.c == "57"));

    // 最終局面: 角交換と打ち駒で 39 枚
    let last = record.board_at(None).unwrap();
    let conditions = last.conditions();
    assert_eq!(conditions.len(), 39);

    let text = serde_json::to_string(&conditions_to_json(&conditions)).unwrap();
    assert_eq!(parse_conditions_json(&text).unwrap(), conditions);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_kif_file(&dir.path().join("none.kif")).unwrap_err();
    assert!(matches!(err, kifsearch_core::KifError::Io { .. }));
}
