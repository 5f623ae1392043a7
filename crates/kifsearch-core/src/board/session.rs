//! 盤面セッション（駒配置の所有者）と2段階の駒移動プロトコル
//!
//! ドラッグ操作は `begin_transfer` → `complete_transfer` の2段階で扱う。
//! 移動元が盤上のマスの場合、移動先への配置が終わってから移動元を消す。
//! この順序は `complete_transfer` の中で保証され、イベントループの
//! 実行順には依存しない。
//!
//! 移動中の駒は1つだけ持つ。完了も破棄もされないまま次のドラッグが
//! 始まった場合、前の移動は放棄されたものとして捨てる。

use log::debug;

use super::{Palette, PieceToken, Placement};
use crate::condition::{SearchCondition, serialize_conditions};
use crate::error::TransferError;
use crate::types::Square;

/// 進行中の駒移動を識別する ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferId(u64);

/// 駒移動の移動元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferSource {
    /// パレット（コピー元。移動しても減らない）
    Palette(PieceToken),
    /// 盤上のマス
    Board(Square),
}

#[derive(Debug, Clone)]
struct PendingTransfer {
    source: TransferSource,
    token: PieceToken,
}

/// `complete_transfer` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub destination: Square,
    /// 移動先にあった駒（置き換えられた）
    pub replaced: Option<PieceToken>,
    /// 移動元として消したマス
    pub cleared_source: Option<Square>,
}

/// 1画面分の盤面状態
#[derive(Debug, Default)]
pub struct BoardSession {
    placement: Placement,
    palette: Palette,
    pending: Option<(TransferId, PendingTransfer)>,
    next_id: u64,
}

impl BoardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の配置からセッションを作る（棋譜の局面から検索する場合など）
    pub fn with_placement(placement: Placement) -> Self {
        Self {
            placement,
            ..Self::default()
        }
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// 駒を置く（既存の駒は置き換える）
    pub fn place(&mut self, sq: Square, token: PieceToken) -> Option<PieceToken> {
        self.placement.place(sq, token)
    }

    /// マスの駒を取り除く
    pub fn pick_up(&mut self, sq: Square) -> Option<PieceToken> {
        self.placement.remove(sq)
    }

    /// ドラッグ開始。盤上の駒はここでは消さない。
    pub fn begin_transfer(&mut self, source: TransferSource) -> Result<TransferId, TransferError> {
        let token = match &source {
            TransferSource::Palette(token) => token.clone(),
            TransferSource::Board(sq) => self
                .placement
                .get(*sq)
                .cloned()
                .ok_or_else(|| TransferError::DataMissing(format!("no piece on square {sq}")))?,
        };
        let id = TransferId(self.next_id);
        self.next_id += 1;
        if let Some((stale, _)) = self.pending.replace((id, PendingTransfer { source, token })) {
            debug!("transfer {stale:?} abandoned by a new drag");
        }
        Ok(id)
    }

    /// ドロップ確定。移動先へ置いてから、盤上の移動元を消す。
    pub fn complete_transfer(
        &mut self,
        id: TransferId,
        destination: Square,
    ) -> Result<TransferOutcome, TransferError> {
        let PendingTransfer { source, token } = self.take_pending(id)?;

        let replaced = self.placement.place(destination, token.clone());

        let cleared_source = match source {
            TransferSource::Board(src) if src != destination => {
                self.release_source(src, &token).then_some(src)
            }
            _ => None,
        };

        Ok(TransferOutcome {
            destination,
            replaced,
            cleared_source,
        })
    }

    /// 盤外でドラッグが終わった。盤上の駒だった場合は移動元から取り除く。
    pub fn discard_transfer(
        &mut self,
        id: TransferId,
    ) -> Result<Option<PieceToken>, TransferError> {
        let PendingTransfer { source, token } = self.take_pending(id)?;

        match source {
            TransferSource::Board(src) if self.release_source(src, &token) => Ok(Some(token)),
            _ => Ok(None),
        }
    }

    /// ドロップイベントの入口。駒データがなければ何もしない。
    pub fn drop_on(&mut self, id: Option<TransferId>, destination: Square) -> bool {
        let Some(id) = id else {
            debug!("drop on {destination} without transfer payload, ignored");
            return false;
        };
        match self.complete_transfer(id, destination) {
            Ok(_) => true,
            Err(e) => {
                debug!("drop on {destination} ignored: {e}");
                false
            }
        }
    }

    /// 現在の配置を検索条件に変換する
    pub fn conditions(&self) -> Vec<SearchCondition> {
        serialize_conditions(&self.placement)
    }

    pub fn pending_transfers(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    fn take_pending(&mut self, id: TransferId) -> Result<PendingTransfer, TransferError> {
        match self.pending.take() {
            Some((pending_id, pending)) if pending_id == id => Ok(pending),
            other => {
                self.pending = other;
                Err(TransferError::DataMissing(format!("unknown transfer {id:?}")))
            }
        }
    }

    // 移動中に別の駒で置き換えられていたら移動元は消さない
    fn release_source(&mut self, src: Square, token: &PieceToken) -> bool {
        if self.placement.get(src) == Some(token) {
            self.placement.remove(src);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceCode, PieceType};

    fn sq(x: u8, y: u8) -> Square {
        Square::from_display(x, y).unwrap()
    }

    fn palette_token(session: &BoardSession, pt: PieceType, color: Color) -> PieceToken {
        session.palette().token_for(PieceCode::new(pt, color))
    }

    #[test]
    fn test_palette_drop_copies_token() {
        let mut session = BoardSession::new();
        let pawn = palette_token(&session, PieceType::Pawn, Color::Sente);

        for dest in [sq(7, 6), sq(2, 6)] {
            let id = session.begin_transfer(TransferSource::Palette(pawn.clone())).unwrap();
            let outcome = session.complete_transfer(id, dest).unwrap();
            assert_eq!(outcome.cleared_source, None);
        }

        assert_eq!(session.placement().len(), 2);
        assert_eq!(session.palette().tokens().len(), 16);
    }

    #[test]
    fn test_board_transfer_moves_token() {
        let mut session = BoardSession::new();
        let rook = palette_token(&session, PieceType::Rook, Color::Gote);
        session.place(sq(8, 2), rook.clone());

        let id = session.begin_transfer(TransferSource::Board(sq(8, 2))).unwrap();
        // 移動先に置くまでは移動元の駒が残っている
        assert_eq!(session.placement().get(sq(8, 2)), Some(&rook));

        let outcome = session.complete_transfer(id, sq(2, 2)).unwrap();
        assert_eq!(outcome.cleared_source, Some(sq(8, 2)));
        assert_eq!(session.placement().get(sq(8, 2)), None);
        assert_eq!(session.placement().get(sq(2, 2)), Some(&rook));
        assert!(session.placement().get(sq(2, 2)).unwrap().rotated);
        assert_eq!(session.placement().len(), 1);
    }

    #[test]
    fn test_board_transfer_onto_occupied_square() {
        let mut session = BoardSession::new();
        let gold = palette_token(&session, PieceType::Gold, Color::Sente);
        let silver = palette_token(&session, PieceType::Silver, Color::Sente);
        session.place(sq(6, 9), gold.clone());
        session.place(sq(5, 9), silver.clone());

        let id = session.begin_transfer(TransferSource::Board(sq(6, 9))).unwrap();
        let outcome = session.complete_transfer(id, sq(5, 9)).unwrap();

        assert_eq!(outcome.replaced, Some(silver));
        assert_eq!(session.placement().len(), 1);
        assert_eq!(session.placement().get(sq(5, 9)), Some(&gold));
    }

    #[test]
    fn test_drop_onto_same_square_keeps_token() {
        let mut session = BoardSession::new();
        let king = palette_token(&session, PieceType::King, Color::Sente);
        session.place(sq(5, 9), king.clone());

        let id = session.begin_transfer(TransferSource::Board(sq(5, 9))).unwrap();
        let outcome = session.complete_transfer(id, sq(5, 9)).unwrap();

        assert_eq!(outcome.cleared_source, None);
        assert_eq!(session.placement().get(sq(5, 9)), Some(&king));
    }

    #[test]
    fn test_discard_removes_board_token_only() {
        let mut session = BoardSession::new();
        let lance = palette_token(&session, PieceType::Lance, Color::Gote);
        session.place(sq(1, 1), lance.clone());

        let id = session.begin_transfer(TransferSource::Board(sq(1, 1))).unwrap();
        assert_eq!(session.discard_transfer(id).unwrap(), Some(lance.clone()));
        assert!(session.placement().is_empty());

        let id = session.begin_transfer(TransferSource::Palette(lance)).unwrap();
        assert_eq!(session.discard_transfer(id).unwrap(), None);
        assert_eq!(session.pending_transfers(), 0);
    }

    #[test]
    fn test_source_replaced_during_transfer_is_kept() {
        let mut session = BoardSession::new();
        let pawn = palette_token(&session, PieceType::Pawn, Color::Sente);
        let knight = palette_token(&session, PieceType::Knight, Color::Sente);
        session.place(sq(3, 7), pawn.clone());

        let id = session.begin_transfer(TransferSource::Board(sq(3, 7))).unwrap();
        session.place(sq(3, 7), knight.clone());
        let outcome = session.complete_transfer(id, sq(3, 6)).unwrap();

        assert_eq!(outcome.cleared_source, None);
        assert_eq!(session.placement().get(sq(3, 7)), Some(&knight));
        assert_eq!(session.placement().get(sq(3, 6)), Some(&pawn));
    }

    #[test]
    fn test_second_drag_from_same_square_does_not_duplicate() {
        let mut session = BoardSession::new();
        let pawn = palette_token(&session, PieceType::Pawn, Color::Sente);
        session.place(sq(7, 7), pawn.clone());

        let first = session.begin_transfer(TransferSource::Board(sq(7, 7))).unwrap();
        let second = session.begin_transfer(TransferSource::Board(sq(7, 7))).unwrap();

        // 先に始めた移動は放棄済み
        let err = session.complete_transfer(first, sq(7, 6)).unwrap_err();
        assert!(matches!(err, TransferError::DataMissing(_)));
        session.complete_transfer(second, sq(7, 5)).unwrap();

        assert_eq!(session.placement().len(), 1);
        assert_eq!(session.placement().get(sq(7, 5)), Some(&pawn));
        assert_eq!(session.placement().get(sq(7, 6)), None);
    }

    #[test]
    fn test_abandoned_transfers_are_not_kept() {
        let mut session = BoardSession::new();
        let gold = palette_token(&session, PieceType::Gold, Color::Gote);
        for _ in 0..1000 {
            session.begin_transfer(TransferSource::Palette(gold.clone())).unwrap();
        }
        assert_eq!(session.pending_transfers(), 1);
        assert!(session.placement().is_empty());
    }

    #[test]
    fn test_pick_up_returns_token() {
        let mut session = BoardSession::new();
        let bishop = palette_token(&session, PieceType::Bishop, Color::Sente);
        session.place(sq(8, 8), bishop.clone());

        assert_eq!(session.pick_up(sq(8, 8)), Some(bishop));
        assert_eq!(session.pick_up(sq(8, 8)), None);
        assert!(session.placement().is_empty());
    }

    #[test]
    fn test_missing_payload_is_ignored() {
        let mut session = BoardSession::new();
        assert!(!session.drop_on(None, sq(5, 5)));

        let err = session.begin_transfer(TransferSource::Board(sq(5, 5))).unwrap_err();
        assert!(matches!(err, TransferError::DataMissing(_)));

        let pawn = palette_token(&session, PieceType::Pawn, Color::Sente);
        let id = session.begin_transfer(TransferSource::Palette(pawn)).unwrap();
        assert!(session.drop_on(Some(id), sq(5, 5)));
        // 同じ ID は二度使えない
        assert!(!session.drop_on(Some(id), sq(4, 5)));
        assert_eq!(session.placement().len(), 1);
    }
}
