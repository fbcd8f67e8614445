//! 検索セッションのテスト
//!
//! 時間を止めた tokio ランタイム上で、デバウンス・古いレスポンスの破棄・
//! 選択セットの保持を検証

use comprobantes::api::FileApi;
use comprobantes::error::{AppError, Result};
use comprobantes::notify::Notification;
use comprobantes::session::{SearchSession, SessionEvent};
use comprobantes_common::{Comprobante, InputOutcome, SearchSettings};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{timeout, Instant};

/// 検索語ごとに遅延と応答を決められる偽API
#[derive(Default)]
struct FakeApi {
    responses: Mutex<HashMap<String, (Duration, std::result::Result<Vec<Comprobante>, u16>)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn respond(self, term: &str, delay_ms: u64, response: std::result::Result<Vec<Comprobante>, u16>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(term.to_string(), (Duration::from_millis(delay_ms), response));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FileApi for FakeApi {
    async fn search(&self, term: &str) -> Result<Vec<Comprobante>> {
        self.calls.lock().unwrap().push(term.to_string());
        let entry = {
            let responses = self.responses.lock().unwrap();
            responses.get(term).cloned()
        };
        let (delay, response) = entry.unwrap_or((Duration::from_millis(10), Ok(Vec::new())));

        tokio::time::sleep(delay).await;
        response.map_err(|status| AppError::Status {
            status,
            url: format!("http://fake/api/files?search={}", term),
        })
    }

    async fn download_multiple(&self, _filenames: &str) -> Result<Vec<u8>> {
        unreachable!("session never downloads")
    }

    async fn preview(&self, _resource_path: &str) -> Result<Vec<u8>> {
        unreachable!("session never previews")
    }
}

fn abc_001() -> Comprobante {
    Comprobante::new(1, "ABC-001", "a.pdf")
}

fn session(api: &Arc<FakeApi>) -> SearchSession<FakeApi> {
    SearchSession::new(Arc::clone(api), SearchSettings::default())
}

/// "ABC" 入力後500msで1回だけ検索し、結果が1件になる
#[tokio::test(start_paused = true)]
async fn test_scenario_abc_after_quiet_period() {
    let api = Arc::new(FakeApi::default().respond("ABC", 50, Ok(vec![abc_001()])));
    let mut session = session(&api);
    let started = Instant::now();

    assert!(matches!(session.input("ABC"), InputOutcome::Scheduled(_)));
    assert!(api.calls().is_empty());

    let event = session.next_event().await.unwrap();
    assert!(matches!(event, SessionEvent::SearchIssued(ref t) if t.term == "ABC"));
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(session.is_loading());

    let event = session.next_event().await.unwrap();
    assert_eq!(event, SessionEvent::ResultsReplaced { term: "ABC".into(), count: 1 });
    assert!(!session.is_loading());
    assert_eq!(session.results(), Some(&[abc_001()][..]));
    assert_eq!(api.calls(), vec!["ABC"]);

    assert!(session.next_event().await.is_none());
    assert!(session.is_idle());
}

/// 500ms未満の間隔で打鍵し続けると、最後の入力で1回だけ検索する
#[tokio::test(start_paused = true)]
async fn test_rapid_typing_issues_single_request() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    for term in ["ABC", "ABCD", "ABCDE", "ABCDEF"] {
        session.input(term);
        // 300ms の間もセッションを動かし続ける（何も発火しない）
        assert!(timeout(Duration::from_millis(300), session.next_event()).await.is_err());
    }
    assert!(api.calls().is_empty());

    let events = session.settle().await;
    assert_eq!(api.calls(), vec!["ABCDEF"]);
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1],
        SessionEvent::ResultsReplaced { term: "ABCDEF".into(), count: 0 }
    );
    // 空の結果は「未検索」とは区別される
    assert_eq!(session.results(), Some(&[][..]));
}

/// 短い入力はリクエストを出さない
#[tokio::test(start_paused = true)]
async fn test_short_terms_never_hit_the_network() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    for term in ["", "A", "AB", "  AB   ", "\tA\n"] {
        assert_eq!(session.input(term), InputOutcome::Cleared);
        assert!(session.results().is_none());
    }

    assert!(session.is_idle());
    assert!(session.settle().await.is_empty());
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(api.calls().is_empty());
}

/// 待ち時間が過ぎてからの入力はそれぞれ検索される
#[tokio::test(start_paused = true)]
async fn test_separate_quiet_periods_issue_separate_requests() {
    let api = Arc::new(FakeApi::default());
    let mut session = session(&api);

    session.input("ABC");
    session.settle().await;
    session.input("XYZ");
    session.settle().await;

    assert_eq!(api.calls(), vec!["ABC", "XYZ"]);
}

/// 選択後に "AB" と入力すると結果は即座に消えるが選択は残る
#[tokio::test(start_paused = true)]
async fn test_short_input_clears_results_but_keeps_selection() {
    let api = Arc::new(FakeApi::default().respond("ABC", 10, Ok(vec![abc_001()])));
    let mut session = session(&api);

    session.input("ABC");
    session.settle().await;
    assert_eq!(session.toggle_result(0), Some(true));

    session.input("AB");
    assert!(session.results().is_none());
    assert_eq!(session.selection().len(), 1);
    assert!(session.selection().contains(&abc_001()));
}

/// 実行中にクリアした場合、遅れて届いたレスポンスは結果を復活させない
#[tokio::test(start_paused = true)]
async fn test_late_response_after_clear_is_discarded() {
    let api = Arc::new(FakeApi::default().respond("ABC", 2_000, Ok(vec![abc_001()])));
    let mut session = session(&api);

    session.input("ABC");
    let ticket = match session.next_event().await {
        Some(SessionEvent::SearchIssued(ticket)) => ticket,
        other => panic!("expected SearchIssued, got {:?}", other),
    };

    session.input("AB");
    assert!(session.results().is_none());
    assert!(!session.is_loading());

    let event = session.next_event().await.unwrap();
    assert_eq!(event, SessionEvent::StaleDiscarded(ticket));
    assert!(session.results().is_none());
}

/// 遅い1回目と速い2回目: 1回目の結果で上書きしない
#[tokio::test(start_paused = true)]
async fn test_slow_first_request_does_not_overwrite_newer_results() {
    let newer = Comprobante::new(2, "ABCD-1", "d.pdf");
    let api = Arc::new(
        FakeApi::default()
            .respond("ABC", 3_000, Ok(vec![abc_001()]))
            .respond("ABCD", 10, Ok(vec![newer.clone()])),
    );
    let mut session = session(&api);

    session.input("ABC");
    assert!(matches!(session.next_event().await, Some(SessionEvent::SearchIssued(_))));

    session.input("ABCD");
    let events = session.settle().await;

    assert_eq!(api.calls(), vec!["ABC", "ABCD"]);
    assert!(matches!(events[0], SessionEvent::SearchIssued(ref t) if t.term == "ABCD"));
    assert_eq!(events[1], SessionEvent::ResultsReplaced { term: "ABCD".into(), count: 1 });
    assert!(matches!(events[2], SessionEvent::StaleDiscarded(ref t) if t.term == "ABC"));
    assert_eq!(session.results(), Some(&[newer][..]));
}

/// 失敗すると結果をクリアしてエラー通知、その後の入力は通常どおり
#[tokio::test(start_paused = true)]
async fn test_failure_clears_results_and_notifies() {
    let api = Arc::new(
        FakeApi::default()
            .respond("ABC", 10, Ok(vec![abc_001()]))
            .respond("ABCD", 10, Err(500)),
    );
    let mut session = session(&api);

    session.input("ABC");
    session.settle().await;
    assert!(session.results().is_some());

    session.input("ABCD");
    let events = session.settle().await;
    assert_eq!(events[1], SessionEvent::SearchFailed(Notification::search_failed()));
    assert!(session.results().is_none());
    assert!(!session.is_loading());

    session.input("ABC");
    let events = session.settle().await;
    assert_eq!(events[1], SessionEvent::ResultsReplaced { term: "ABC".into(), count: 1 });
}

/// 別の検索で得た同じキーの項目は同じ選択対象
#[tokio::test(start_paused = true)]
async fn test_selection_survives_searches() {
    let api = Arc::new(
        FakeApi::default()
            .respond("ABC", 10, Ok(vec![abc_001(), Comprobante::new(3, "ABC-003", "c.pdf")]))
            .respond("ABC-001", 10, Ok(vec![abc_001()])),
    );
    let mut session = session(&api);

    session.input("ABC");
    session.settle().await;
    assert_eq!(session.toggle_result(0), Some(true));
    assert_eq!(session.toggle_result(1), Some(true));
    assert_eq!(session.toggle_result(5), None);

    session.input("ABC-001");
    session.settle().await;
    // 同じキーなのでトグルで外れる
    assert_eq!(session.toggle_result(0), Some(false));
    assert_eq!(session.selection().resource_paths(), vec!["c.pdf"]);
}
