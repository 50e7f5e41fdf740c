use super::*;
use async_trait::async_trait;
use serde_json::json;
use shared::{domain::FormInput, error::GENERIC_ERROR_MESSAGE};
use std::collections::HashMap;

type Reply = Result<Vec<ResultRecord>, TransportError>;

/// Holds one pending reply per email; the test decides when each reply is
/// released. Keyed by email so an aborted task that never reached the
/// transport cannot take another submission's reply.
struct ScriptedTransport {
    replies: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    seen: Arc<Mutex<Vec<SearchQuery>>>,
}

impl ScriptedTransport {
    fn new(
        emails: &[&str],
    ) -> (
        Self,
        HashMap<String, oneshot::Sender<Reply>>,
        Arc<Mutex<Vec<SearchQuery>>>,
    ) {
        let mut senders = HashMap::new();
        let mut receivers = HashMap::new();
        for email in emails {
            let (tx, rx) = oneshot::channel();
            senders.insert(email.to_string(), tx);
            receivers.insert(email.to_string(), rx);
        }
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                replies: Mutex::new(receivers),
                seen: Arc::clone(&seen),
            },
            senders,
            seen,
        )
    }
}

#[async_trait]
impl SearchTransport for ScriptedTransport {
    async fn search(&self, query: &SearchQuery) -> Reply {
        self.seen.lock().expect("seen lock").push(query.clone());
        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .remove(query.email())
            .expect("unscripted search call");
        reply
            .await
            .unwrap_or_else(|_| Err(TransportError::Unparseable("reply dropped".to_string())))
    }
}

fn release(replies: &mut HashMap<String, oneshot::Sender<Reply>>, email: &str, reply: Reply) {
    let sender = replies.remove(email).expect("scripted email");
    // The receiving task may already be aborted.
    let _ = sender.send(reply);
}

fn query(email: &str, number: Option<&str>) -> SearchQuery {
    FormInput::new(email, number.map(str::to_string))
        .validate()
        .expect("valid input")
}

fn records(value: serde_json::Value) -> Vec<ResultRecord> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().map(ResultRecord).collect(),
        other => panic!("expected array, got {other}"),
    }
}

#[tokio::test]
async fn submit_sets_loading_and_clears_error() {
    let (transport, mut replies, _) = ScriptedTransport::new(&["a@b.com", "c@d.com"]);
    let coordinator = RequestCoordinator::new(transport);

    let first = coordinator.submit(query("a@b.com", None));
    release(
        &mut replies,
        "a@b.com",
        Err(TransportError::ServerMessage("no match".to_string())),
    );
    assert!(first.settled().await.is_err());
    assert_eq!(coordinator.state().error_message(), "no match");

    let _second = coordinator.submit(query("c@d.com", None));
    let state = coordinator.state();
    assert!(state.loading());
    assert_eq!(state.error_message(), "");
    assert!(coordinator.current_request().is_some());
}

#[tokio::test]
async fn success_replaces_results_in_order() {
    let (transport, mut replies, seen) = ScriptedTransport::new(&["a@b.com"]);
    let coordinator = RequestCoordinator::new(transport);

    let submission = coordinator.submit(query("a@b.com", None));
    let body = records(json!([{"id": 2}, {"id": 1}]));
    release(&mut replies, "a@b.com", Ok(body.clone()));

    assert_eq!(submission.settled().await.expect("success"), body);
    let state = coordinator.state();
    assert_eq!(state.results(), body.as_slice());
    assert_eq!(state.error_message(), "");
    assert!(!state.loading());
    assert_eq!(coordinator.current_request(), None);
    assert_eq!(seen.lock().expect("seen").len(), 1);
}

#[tokio::test]
async fn failure_keeps_previous_results() {
    let (transport, mut replies, seen) = ScriptedTransport::new(&["a@b.com", "e@f.com"]);
    let coordinator = RequestCoordinator::new(transport);
    let first_rows = records(json!([{"id": 1}]));

    let first = coordinator.submit(query("a@b.com", None));
    release(&mut replies, "a@b.com", Ok(first_rows.clone()));
    first.settled().await.expect("first succeeds");

    let second = coordinator.submit(query("e@f.com", Some("12-34-56")));
    release(
        &mut replies,
        "e@f.com",
        Err(TransportError::ServerMessage("no match".to_string())),
    );
    let err = second.settled().await.expect_err("second fails");
    assert!(!err.is_cancelled());

    let state = coordinator.state();
    assert_eq!(state.error_message(), "no match");
    assert_eq!(state.results(), first_rows.as_slice());
    assert!(!state.loading());
    assert_eq!(
        seen.lock().expect("seen")[1].number(),
        Some("12-34-56")
    );
}

#[tokio::test]
async fn unreadable_failure_shows_generic_message() {
    let (transport, mut replies, _) = ScriptedTransport::new(&["a@b.com"]);
    let coordinator = RequestCoordinator::new(transport);

    let submission = coordinator.submit(query("a@b.com", None));
    release(
        &mut replies,
        "a@b.com",
        Err(TransportError::Unparseable("status 502".to_string())),
    );

    assert!(matches!(
        submission.settled().await,
        Err(SearchError::Transport(TransportError::Unparseable(_)))
    ));
    assert_eq!(coordinator.state().error_message(), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn superseded_request_never_applies_even_when_it_answers_last() {
    let (transport, mut replies, _) = ScriptedTransport::new(&["a@b.com", "c@d.com"]);
    let coordinator = RequestCoordinator::new(transport);

    let first = coordinator.submit(query("a@b.com", Some("12-34-56")));
    let second = coordinator.submit(query("c@d.com", None));
    assert_eq!(coordinator.current_request(), Some(second.id()));

    let second_rows = records(json!([{"id": "second"}]));
    release(&mut replies, "c@d.com", Ok(second_rows.clone()));
    assert_eq!(second.settled().await.expect("second succeeds"), second_rows);

    release(&mut replies, "a@b.com", Ok(records(json!([{"id": "first"}]))));
    assert_eq!(first.settled().await, Err(SearchError::Cancelled));

    let state = coordinator.state();
    assert_eq!(state.results(), second_rows.as_slice());
    assert_eq!(state.error_message(), "");
    assert!(!state.loading());
}

#[tokio::test]
async fn superseded_request_answering_first_is_ignored() {
    let (transport, mut replies, _) = ScriptedTransport::new(&["a@b.com", "c@d.com"]);
    let coordinator = RequestCoordinator::new(transport);

    let first = coordinator.submit(query("a@b.com", None));
    let second = coordinator.submit(query("c@d.com", None));

    release(
        &mut replies,
        "a@b.com",
        Err(TransportError::ServerMessage("stale".to_string())),
    );
    assert_eq!(first.settled().await, Err(SearchError::Cancelled));
    assert_eq!(coordinator.state().error_message(), "");
    assert!(coordinator.state().loading());

    release(&mut replies, "c@d.com", Ok(Vec::new()));
    second.settled().await.expect("second succeeds");
    let state = coordinator.state();
    assert!(!state.loading());
    assert_eq!(state.error_message(), "");
    assert!(state.results().is_empty());
}

#[tokio::test]
async fn late_settlement_of_stale_request_is_a_no_op() {
    let (transport, _replies, _) = ScriptedTransport::new(&["a@b.com"]);
    let coordinator = RequestCoordinator::new(transport);
    let live = coordinator.submit(query("a@b.com", None));
    let before = coordinator.state();

    let stale = RequestId(live.id().0 + 100);
    let outcome = settle(
        &coordinator.inner,
        &coordinator.state_tx,
        stale,
        Err(TransportError::ServerMessage("late".to_string())),
    );

    assert_eq!(outcome, Err(SearchError::Cancelled));
    assert_eq!(coordinator.state(), before);
    assert_eq!(coordinator.current_request(), Some(live.id()));
}

#[tokio::test]
async fn shutdown_cancels_live_request_without_touching_state() {
    let (transport, mut replies, _) = ScriptedTransport::new(&["a@b.com"]);
    let coordinator = RequestCoordinator::new(transport);

    let submission = coordinator.submit(query("a@b.com", None));
    let before = coordinator.state();
    coordinator.shutdown();

    release(&mut replies, "a@b.com", Ok(records(json!([{"id": 1}]))));
    assert_eq!(submission.settled().await, Err(SearchError::Cancelled));
    assert_eq!(coordinator.state(), before);
    assert_eq!(coordinator.current_request(), None);
}

#[tokio::test]
async fn subscribers_observe_settled_state() {
    let (transport, mut replies, _) = ScriptedTransport::new(&["a@b.com"]);
    let coordinator = RequestCoordinator::new(transport);
    let mut rx = coordinator.subscribe();

    let submission = coordinator.submit(query("a@b.com", None));
    let rows = records(json!([{"id": 1}]));
    release(&mut replies, "a@b.com", Ok(rows.clone()));
    submission.settled().await.expect("success");

    rx.changed().await.expect("state published");
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.results(), rows.as_slice());
    assert!(!seen.loading());
}
