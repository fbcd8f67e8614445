//! 検索セッション（イベントループ側）
//!
//! `QueryState` を実際のタイマーと非同期リクエストで駆動する。
//! 状態を触るのは `input` / `next_event` を呼ぶタスクだけで、
//! リクエストは `JoinSet` のタスクとして走り、結果はこのループに戻される。
//!
//! ```text
//! input(term) ──▶ QueryState::on_input_change ──▶ 期限を1つだけ保持
//! next_event().await
//!   ├─ 期限到達   → on_timer_fired  → spawn(search) → SearchIssued
//!   └─ 完了を回収 → on_search_complete → ResultsReplaced / SearchFailed / StaleDiscarded
//! ```

use crate::api::FileApi;
use crate::error::Result;
use crate::notify::Notification;
use comprobantes_common::{
    Comprobante, InputOutcome, QueryState, Resolution, SearchSettings, SearchTicket,
    SelectionSet, TimerToken,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};

/// next_event が返すイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// 待ち時間が経過してリクエストを出した
    SearchIssued(SearchTicket),
    /// 結果リストを置き換えた
    ResultsReplaced { term: String, count: usize },
    /// 検索に失敗して結果リストをクリアした
    SearchFailed(Notification),
    /// 古いレスポンスを破棄した
    StaleDiscarded(SearchTicket),
}

type SearchOutcome = (SearchTicket, Result<Vec<Comprobante>>);

pub struct SearchSession<A: FileApi> {
    api: Arc<A>,
    query: QueryState,
    selection: SelectionSet,
    timer: Option<(TimerToken, Instant)>,
    in_flight: JoinSet<SearchOutcome>,
}

impl<A: FileApi> SearchSession<A> {
    pub fn new(api: Arc<A>, settings: SearchSettings) -> Self {
        Self {
            api,
            query: QueryState::new(settings),
            selection: SelectionSet::new(),
            timer: None,
            in_flight: JoinSet::new(),
        }
    }

    /// キー入力（入力欄の値が変わるたびに呼ぶ）
    ///
    /// 短い入力は結果を即座にクリアする。実行中のリクエストは止めないが、
    /// その結果は後で破棄される。
    pub fn input(&mut self, term: &str) -> InputOutcome {
        let outcome = self.query.on_input_change(term);
        self.timer = match outcome {
            InputOutcome::Scheduled(token) => {
                Some((token, Instant::now() + self.query.settings().delay()))
            }
            InputOutcome::Cleared => None,
        };
        outcome
    }

    /// タイマーも実行中のリクエストもない
    pub fn is_idle(&self) -> bool {
        self.timer.is_none() && self.in_flight.is_empty()
    }

    /// 次のイベントまで待つ。待つものがなければ None。
    ///
    /// キャンセルしても状態は失われない（`select!` の分岐に置ける）。
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        loop {
            if self.is_idle() {
                return None;
            }

            let deadline = self.timer.map(|(_, at)| at);
            tokio::select! {
                _ = wait_until(deadline), if deadline.is_some() => {
                    if let Some(event) = self.fire_timer() {
                        return Some(event);
                    }
                }
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    match joined {
                        Ok((ticket, outcome)) => return Some(self.resolve(ticket, outcome)),
                        Err(e) => {
                            tracing::warn!("search task lost: {}", e);
                            if self.in_flight.is_empty() {
                                self.query.clear_loading();
                            }
                        }
                    }
                }
                else => return None,
            }
        }
    }

    /// 待つものがなくなるまでイベントを集める
    pub async fn settle(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    fn fire_timer(&mut self) -> Option<SessionEvent> {
        let (token, _) = self.timer.take()?;
        let ticket = self.query.on_timer_fired(token)?;
        tracing::debug!(seq = ticket.seq, term = %ticket.term, "search issued");

        let api = Arc::clone(&self.api);
        let tagged = ticket.clone();
        self.in_flight.spawn(async move {
            let outcome = api.search(&tagged.term).await;
            (tagged, outcome)
        });
        Some(SessionEvent::SearchIssued(ticket))
    }

    fn resolve(&mut self, ticket: SearchTicket, outcome: Result<Vec<Comprobante>>) -> SessionEvent {
        match self.query.on_search_complete(&ticket, outcome) {
            Resolution::Applied(count) => SessionEvent::ResultsReplaced {
                term: ticket.term,
                count,
            },
            Resolution::Failed(e) => {
                tracing::warn!(term = %ticket.term, "search failed: {}", e);
                SessionEvent::SearchFailed(Notification::search_failed())
            }
            Resolution::Stale => {
                tracing::debug!(seq = ticket.seq, term = %ticket.term, "stale response discarded");
                SessionEvent::StaleDiscarded(ticket)
            }
        }
    }

    pub fn raw_input(&self) -> &str {
        self.query.raw_input()
    }

    pub fn settings(&self) -> &SearchSettings {
        self.query.settings()
    }

    /// 読み込み中表示
    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    /// None は未検索、空スライスは該当なし
    pub fn results(&self) -> Option<&[Comprobante]> {
        self.query.results()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// 結果リストの index 番目（0始まり）を選択/解除
    ///
    /// # Returns
    /// 範囲外なら None、それ以外は切り替え後に選択されているか
    pub fn toggle_result(&mut self, index: usize) -> Option<bool> {
        let item = self.query.results()?.get(index)?.clone();
        Some(self.selection.toggle(&item))
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
