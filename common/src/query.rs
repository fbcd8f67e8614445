//! デバウンス付きインクリメンタル検索の状態機械
//!
//! 時間そのものは扱わない。タイマーの起動・発火、リクエストの発行・完了は
//! 呼び出し側（イベントループ）が通知し、この状態機械が結果リストの
//! 置き換えと古いレスポンスの破棄を決める。
//!
//! ```text
//! on_input_change ─┬─ 短い → 結果クリア（タイマーなし）
//!                  └─ それ以外 → TimerToken を発行
//! on_timer_fired(token) ── 最新トークンのみ → SearchTicket{seq, term}
//! on_search_complete(ticket, 結果) ─┬─ 最新 & 入力と一致 → 適用
//!                                   └─ それ以外 → Stale
//! ```

use crate::types::Comprobante;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 検索に必要な最小文字数（trim後）
pub const MIN_SEARCH_LENGTH: usize = 3;

/// 入力が落ち着いてから検索するまでの待ち時間
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// 検索設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub min_length: usize,
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_length: MIN_SEARCH_LENGTH,
            debounce_ms: DEBOUNCE_DELAY.as_millis() as u64,
        }
    }
}

impl SearchSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// trim後の文字数が最小文字数以上か
    pub fn is_searchable(&self, term: &str) -> bool {
        term.trim().chars().count() >= self.min_length
    }
}

/// 予約済み検索のトークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// 発行済みリクエストのタグ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub term: String,
}

/// on_input_change の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// 入力が短いため結果をクリアした
    Cleared,
    /// 待ち時間後に検索する
    Scheduled(TimerToken),
}

/// on_search_complete の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<E> {
    /// 結果リストを置き換えた（件数）
    Applied(usize),
    /// 失敗したので結果リストをクリアした
    Failed(E),
    /// 古いレスポンスなので破棄した
    Stale,
}

/// 検索の状態
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    settings: SearchSettings,
    raw_input: String,
    armed: Option<TimerToken>,
    next_token: u64,
    last_issued: Option<SearchTicket>,
    next_seq: u64,
    loading: Option<u64>,
    results: Option<Vec<Comprobante>>,
}

impl QueryState {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// キー入力ごとに呼ぶ
    ///
    /// 予約済みの検索は常にキャンセルされる。
    pub fn on_input_change(&mut self, term: &str) -> InputOutcome {
        self.armed = None;
        self.raw_input = term.to_string();

        if !self.settings.is_searchable(term) {
            self.results = None;
            self.loading = None;
            return InputOutcome::Cleared;
        }

        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.armed = Some(token);
        InputOutcome::Scheduled(token)
    }

    /// 予約したタイマーが発火した
    ///
    /// 既にキャンセルされたトークンなら None。
    pub fn on_timer_fired(&mut self, token: TimerToken) -> Option<SearchTicket> {
        if self.armed != Some(token) {
            return None;
        }
        self.armed = None;

        self.next_seq += 1;
        let ticket = SearchTicket {
            seq: self.next_seq,
            term: self.raw_input.clone(),
        };
        self.last_issued = Some(ticket.clone());
        self.loading = Some(ticket.seq);
        Some(ticket)
    }

    /// リクエストが完了した
    pub fn on_search_complete<E>(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<Comprobante>, E>,
    ) -> Resolution<E> {
        if self.loading == Some(ticket.seq) {
            self.loading = None;
        }

        if !self.is_current(ticket) {
            return Resolution::Stale;
        }

        match outcome {
            Ok(items) => {
                let count = items.len();
                self.results = Some(items);
                Resolution::Applied(count)
            }
            Err(e) => {
                self.results = None;
                Resolution::Failed(e)
            }
        }
    }

    /// 結果の行方が分からなくなったリクエストの読み込み表示を外す
    pub fn clear_loading(&mut self) {
        self.loading = None;
    }

    fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.last_issued.as_ref().map(|t| t.seq) == Some(ticket.seq)
            && ticket.term == self.raw_input
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn is_scheduled(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn last_issued(&self) -> Option<&SearchTicket> {
        self.last_issued.as_ref()
    }

    /// None は未検索（またはクリア済み）、空の Vec は「該当なし」
    pub fn results(&self) -> Option<&[Comprobante]> {
        self.results.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(outcome: InputOutcome) -> TimerToken {
        match outcome {
            InputOutcome::Scheduled(token) => token,
            InputOutcome::Cleared => panic!("expected a scheduled search"),
        }
    }

    fn issue(state: &mut QueryState, term: &str) -> SearchTicket {
        let token = scheduled(state.on_input_change(term));
        state.on_timer_fired(token).unwrap()
    }

    fn abc() -> Vec<Comprobante> {
        vec![Comprobante::new(1, "ABC-001", "a.pdf")]
    }

    #[test]
    fn test_short_input_clears_without_scheduling() {
        let mut state = QueryState::default();
        for term in ["", "A", "AB", "  AB  ", "\tA "] {
            assert_eq!(state.on_input_change(term), InputOutcome::Cleared);
            assert!(!state.is_scheduled());
            assert!(state.results().is_none());
        }
    }

    #[test]
    fn test_scenario_abc_search_applies_results() {
        let mut state = QueryState::default();
        let token = scheduled(state.on_input_change("ABC"));

        let ticket = state.on_timer_fired(token).unwrap();
        assert_eq!(ticket.term, "ABC");
        assert!(state.is_loading());

        let resolution: Resolution<()> = state.on_search_complete(&ticket, Ok(abc()));
        assert_eq!(resolution, Resolution::Applied(1));
        assert!(!state.is_loading());
        assert_eq!(state.results().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_new_input_cancels_previous_timer() {
        let mut state = QueryState::default();
        let first = scheduled(state.on_input_change("ABC"));
        let second = scheduled(state.on_input_change("ABCD"));

        assert_ne!(first, second);
        assert!(state.on_timer_fired(first).is_none());

        let ticket = state.on_timer_fired(second).unwrap();
        assert_eq!(ticket.term, "ABCD");
        // 同じトークンは二度発火しない
        assert!(state.on_timer_fired(second).is_none());
    }

    #[test]
    fn test_short_input_cancels_timer() {
        let mut state = QueryState::default();
        let token = scheduled(state.on_input_change("ABC"));
        state.on_input_change("AB");
        assert!(state.on_timer_fired(token).is_none());
    }

    #[test]
    fn test_late_response_after_clear_is_discarded() {
        let mut state = QueryState::default();
        let token = scheduled(state.on_input_change("ABC"));
        let ticket = state.on_timer_fired(token).unwrap();

        assert_eq!(state.on_input_change("AB"), InputOutcome::Cleared);
        assert!(!state.is_loading());

        let resolution: Resolution<()> = state.on_search_complete(&ticket, Ok(abc()));
        assert_eq!(resolution, Resolution::Stale);
        assert!(state.results().is_none());
    }

    #[test]
    fn test_slow_first_response_does_not_overwrite_newer() {
        let mut state = QueryState::default();
        let first = issue(&mut state, "ABC");
        let second = issue(&mut state, "ABCD");

        let newer = vec![Comprobante::new(2, "ABCD-1", "d.pdf")];
        let resolution: Resolution<()> = state.on_search_complete(&second, Ok(newer.clone()));
        assert_eq!(resolution, Resolution::Applied(1));

        let resolution: Resolution<()> = state.on_search_complete(&first, Ok(abc()));
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(state.results(), Some(newer.as_slice()));
    }

    #[test]
    fn test_response_for_outdated_term_is_stale() {
        let mut state = QueryState::default();
        let ticket = issue(&mut state, "ABC");

        // 新しい入力のタイマーはまだ発火していない
        state.on_input_change("ABCX");
        let resolution: Resolution<()> = state.on_search_complete(&ticket, Ok(abc()));
        assert_eq!(resolution, Resolution::Stale);
    }

    #[test]
    fn test_failure_clears_results() {
        let mut state = QueryState::default();
        let ticket = issue(&mut state, "ABC");
        let _: Resolution<()> = state.on_search_complete(&ticket, Ok(abc()));

        let ticket = issue(&mut state, "ABC");
        let resolution = state.on_search_complete(&ticket, Err("boom"));
        assert_eq!(resolution, Resolution::Failed("boom"));
        assert!(state.results().is_none());

        // 失敗後も次の入力は通常どおり予約される
        assert!(matches!(state.on_input_change("ABCD"), InputOutcome::Scheduled(_)));
    }

    #[test]
    fn test_empty_response_is_distinct_from_not_searched() {
        let mut state = QueryState::default();
        assert!(state.results().is_none());

        let ticket = issue(&mut state, "ZZZ");
        let _: Resolution<()> = state.on_search_complete(&ticket, Ok(Vec::new()));
        assert_eq!(state.results(), Some(&[][..]));
    }

    #[test]
    fn test_custom_settings() {
        let settings = SearchSettings { min_length: 5, debounce_ms: 200 };
        assert_eq!(settings.delay(), Duration::from_millis(200));
        assert!(!settings.is_searchable("ABCD"));
        assert!(settings.is_searchable("ÁBCDÉ"));

        let mut state = QueryState::new(settings);
        assert_eq!(state.on_input_change("ABCD"), InputOutcome::Cleared);
    }
}
