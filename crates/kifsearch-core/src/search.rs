//! 検索の実行と表示状態の管理
//!
//! 通信そのものは `SearchBackend` の実装（HTTP クライアント等）に任せる。
//! 検索に失敗しても表示中の結果は書き換えず、診断ログに残したうえで
//! エラーを呼び出し側に返す。

use log::{error, info};

use crate::board::BoardSession;
use crate::condition::SearchCondition;
use crate::error::SearchError;
use crate::report::SearchReport;
use crate::result::GameResult;

/// 検索サービスとの境界
pub trait SearchBackend {
    fn search(&self, conditions: &[SearchCondition]) -> Result<Vec<GameResult>, SearchError>;
}

impl<B: SearchBackend + ?Sized> SearchBackend for &B {
    fn search(&self, conditions: &[SearchCondition]) -> Result<Vec<GameResult>, SearchError> {
        (**self).search(conditions)
    }
}

/// 画面に出ている検索結果と診断ログ
#[derive(Debug, Default)]
pub struct ResultView {
    report: Option<SearchReport>,
    diagnostics: Vec<String>,
}

impl ResultView {
    /// 表示中の結果（まだ一度も検索していなければ `None`）
    pub fn report(&self) -> Option<&SearchReport> {
        self.report.as_ref()
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    fn show(&mut self, report: SearchReport) -> &SearchReport {
        self.report.insert(report)
    }

    fn log_failure(&mut self, err: &SearchError) {
        self.diagnostics.push(format!("検索リクエスト失敗: {err}"));
    }
}

/// 盤面セッションと検索結果表示をまとめて持つ
pub struct SearchController<B> {
    backend: B,
    session: BoardSession,
    view: ResultView,
}

impl<B: SearchBackend> SearchController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_session(backend, BoardSession::new())
    }

    pub fn with_session(backend: B, session: BoardSession) -> Self {
        Self {
            backend,
            session,
            view: ResultView::default(),
        }
    }

    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut BoardSession {
        &mut self.session
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// 現在の盤面で検索し、成功したら表示を差し替える。
    ///
    /// 失敗時は表示中の表・サマリーをそのまま残し、エラーを返す。
    pub fn run_search(&mut self) -> Result<&SearchReport, SearchError> {
        let conditions = self.session.conditions();
        info!("検索条件: {}件", conditions.len());

        match self.backend.search(&conditions) {
            Ok(results) => {
                info!("検索結果: {}件", results.len());
                Ok(self.view.show(SearchReport::from_results(&results)))
            }
            Err(e) => {
                error!("検索リクエスト失敗: {e}");
                self.view.log_failure(&e);
                Err(e)
            }
        }
    }
}
