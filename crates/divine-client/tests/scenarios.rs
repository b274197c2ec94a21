//! End-to-end session scenarios with scripted collaborators and a paused clock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{broadcast, Notify};

use divine_client::matching::ScriptedDraw;
use divine_client::notifications::{Alert, AlertSink};
use divine_client::persistence::{PersistenceSink, ProfileReport, ReportReason};
use divine_client::{Session, SessionConfig, SessionEvent, SwipeOutcome};
use divine_content::{ProfileSupply, Responder};
use divine_shared::constants::{EMPTY_REPLY_PLACEHOLDER, RESPONDER_APOLOGY};
use divine_shared::{
    ChatTurn, ContentError, Direction, MatchId, NotifyError, Photo, Profile, ProfileId, Role,
    Screen, SenderId,
};
use divine_store::{Match, Message, StoreError};

// ---------------------------------------------------------------------------
// Scripted collaborators
// ---------------------------------------------------------------------------

struct ScriptedSupply {
    batches: Mutex<VecDeque<Result<Vec<Profile>, ContentError>>>,
    calls: Mutex<Vec<usize>>,
}

impl ScriptedSupply {
    fn new(batches: Vec<Result<Vec<Profile>, ContentError>>) -> Arc<Self> {
        Arc::new(Self {
            batches: Mutex::new(batches.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileSupply for ScriptedSupply {
    async fn fetch(&self, count: usize) -> Result<Vec<Profile>, ContentError> {
        self.calls.lock().unwrap().push(count);
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ContentError::Unavailable("script exhausted".into())))
    }
}

/// Replies `re: <message>` (or a fixed result), optionally waiting on a gate.
struct ScriptedResponder {
    gate: Option<Arc<Notify>>,
    fixed: Option<Result<String, ContentError>>,
    seen: Mutex<Vec<(String, String, Vec<ChatTurn>)>>,
}

impl ScriptedResponder {
    fn echo() -> Arc<Self> {
        Arc::new(Self {
            gate: None,
            fixed: None,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            gate: Some(gate),
            fixed: None,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn fixed(result: Result<String, ContentError>) -> Arc<Self> {
        Arc::new(Self {
            gate: None,
            fixed: Some(result),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn reply(
        &self,
        message: &str,
        counterpart: &Profile,
        history: &[ChatTurn],
    ) -> Result<String, ContentError> {
        self.seen.lock().unwrap().push((
            message.to_string(),
            counterpart.name.clone(),
            history.to_vec(),
        ));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.fixed {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(_)) => Err(ContentError::Status {
                status: 500,
                body: "boom".into(),
            }),
            None => Ok(format!("re: {message}")),
        }
    }
}

#[derive(Default)]
struct RecordingAlerts(Mutex<Vec<Alert>>);

impl RecordingAlerts {
    fn alerts(&self) -> Vec<Alert> {
        self.0.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn present(&self, alert: &Alert) -> Result<(), NotifyError> {
        self.0.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

struct BrokenAlerts;

impl AlertSink for BrokenAlerts {
    fn present(&self, _alert: &Alert) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable("no display".into()))
    }
}

#[derive(Default)]
struct RecordingPersistence {
    created: Mutex<Vec<MatchId>>,
    removed: Mutex<Vec<MatchId>>,
    messages: Mutex<Vec<String>>,
    reports: Mutex<Vec<ProfileReport>>,
}

impl PersistenceSink for RecordingPersistence {
    fn match_created(&self, m: &Match) {
        self.created.lock().unwrap().push(m.id);
    }

    fn match_removed(&self, match_id: MatchId) {
        self.removed.lock().unwrap().push(match_id);
    }

    fn message_stored(&self, message: &Message) {
        self.messages.lock().unwrap().push(message.text.clone());
    }

    fn profile_reported(&self, report: &ProfileReport) {
        self.reports.lock().unwrap().push(report.clone());
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn profile(id: &str, verified: bool, photos: usize) -> Profile {
    Profile {
        id: ProfileId::new(id),
        name: format!("Name-{id}"),
        age: 28,
        bio: format!("Bio of {id}"),
        location: "Lisbon".into(),
        job: "Engineer".into(),
        interests: vec!["Hiking".into(), "Jazz".into(), "Tea".into()],
        photos: (0..photos)
            .map(|i| Photo::new(format!("{id}-{i}"), format!("https://img/{id}/{i}.jpg")))
            .collect(),
        distance: 4,
        is_verified: verified,
    }
}

fn batch(ids: &[&str]) -> Vec<Profile> {
    ids.iter().map(|id| profile(id, true, 1)).collect()
}

struct Harness {
    session: Session,
    supply: Arc<ScriptedSupply>,
    alerts: Arc<RecordingAlerts>,
    persistence: Arc<RecordingPersistence>,
}

fn harness(
    batches: Vec<Result<Vec<Profile>, ContentError>>,
    responder: Arc<ScriptedResponder>,
    draws: ScriptedDraw,
) -> Harness {
    let supply = ScriptedSupply::new(batches);
    let alerts = Arc::new(RecordingAlerts::default());
    let persistence = Arc::new(RecordingPersistence::default());
    let session = Session::builder(SessionConfig::default())
        .supply(supply.clone())
        .responder(responder)
        .alerts(alerts.clone())
        .persistence(persistence.clone())
        .draw(draws)
        .build();
    Harness {
        session,
        supply,
        alerts,
        persistence,
    }
}

async fn next_matching(
    rx: &mut broadcast::Receiver<SessionEvent>,
    pred: impl Fn(&SessionEvent) -> bool,
) -> SessionEvent {
    loop {
        let event = rx.recv().await.expect("event channel closed");
        if pred(&event) {
            return event;
        }
    }
}

/// Deck loaded, one accepted match with the first card.
async fn matched_harness(responder: Arc<ScriptedResponder>) -> (Harness, MatchId) {
    let h = harness(
        vec![Ok(batch(&["p1", "p2", "p3"]))],
        responder,
        ScriptedDraw::always(0.9),
    );
    h.session.replenish().await;
    let outcome = h.session.swipe(Direction::Accept).await;
    let id = outcome.matched().expect("draw above threshold").id;
    (h, id)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn scenario_accept_then_undo() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2", "p3"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.5),
    );
    let mut rx = h.session.subscribe();
    assert_eq!(h.session.replenish().await, 3);

    let outcome = h.session.swipe(Direction::Accept).await;
    let m = outcome.matched().cloned().unwrap();
    assert_eq!(m.profile.id.as_str(), "p1");
    assert_eq!(h.session.matches().len(), 1);
    assert_eq!(h.session.conversation(m.id).unwrap().len(), 0);
    assert_eq!(h.session.deck_len(), 2);
    assert!(h.session.can_undo());

    let event = next_matching(&mut rx, |e| matches!(e, SessionEvent::ItsAMatch { .. })).await;
    assert_eq!(
        event,
        SessionEvent::ItsAMatch {
            match_id: m.id,
            profile_id: ProfileId::new("p1"),
            name: "Name-p1".into(),
        }
    );

    let undone = h.session.undo().unwrap();
    assert_eq!(undone.match_id, Some(m.id));
    assert_eq!(h.session.current_profile().unwrap().id.as_str(), "p1");
    assert_eq!(h.session.deck_len(), 3);
    assert!(h.session.matches().is_empty());
    assert!(h.session.conversation(m.id).is_none());
    assert!(!h.session.can_undo());
    assert_eq!(*h.persistence.created.lock().unwrap(), vec![m.id]);
    assert_eq!(*h.persistence.removed.lock().unwrap(), vec![m.id]);
}

#[tokio::test(start_paused = true)]
async fn scenario_reject_never_matches() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.99),
    );
    h.session.replenish().await;

    let outcome = h.session.swipe(Direction::Reject).await;
    match outcome {
        SwipeOutcome::Decided { decision, matched } => {
            assert_eq!(decision.direction, Direction::Reject);
            assert_eq!(decision.profile.id.as_str(), "p1");
            assert!(matched.is_none());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(h.session.matches().is_empty());

    let undone = h.session.undo().unwrap();
    assert_eq!(undone.profile.id.as_str(), "p1");
    assert!(undone.match_id.is_none());
    assert_eq!(h.session.current_profile().unwrap().id.as_str(), "p1");
}

#[tokio::test(start_paused = true)]
async fn scenario_supply_failure_uses_fallback() {
    let h = harness(
        vec![Err(ContentError::Http("connection refused".into()))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.0),
    );
    let mut rx = h.session.subscribe();

    assert_eq!(h.session.replenish().await, 3);
    let names: Vec<String> = {
        let mut names = Vec::new();
        while let Some(p) = h.session.current_profile() {
            names.push(p.name.clone());
            h.session.swipe(Direction::Reject).await;
            if names.len() == 3 {
                break;
            }
        }
        names
    };
    assert_eq!(names, ["Sarah", "Alex", "Mike"]);

    // Initial load, then the automatic one after the last decision.
    for _ in 0..2 {
        let event =
            next_matching(&mut rx, |e| matches!(e, SessionEvent::DeckReplenished { .. })).await;
        assert_eq!(
            event,
            SessionEvent::DeckReplenished {
                added: 3,
                fallback: true
            }
        );
    }
    assert!(h.session.deck_len() > 0);
    assert_eq!(h.session.current_profile().unwrap().name, "Sarah");
    assert_eq!(h.supply.calls(), vec![5, 5]);
}

#[tokio::test(start_paused = true)]
async fn offline_session_never_runs_dry() {
    let session = Session::builder(SessionConfig::default())
        .draw(ScriptedDraw::always(0.0))
        .build();
    let mut rx = session.subscribe();
    assert_eq!(session.replenish().await, 3);
    next_matching(&mut rx, |e| matches!(e, SessionEvent::DeckReplenished { .. })).await;

    for round in 0..2 {
        for _ in 0..3 {
            assert!(matches!(
                session.swipe(Direction::Reject).await,
                SwipeOutcome::Decided { .. }
            ));
        }
        let event =
            next_matching(&mut rx, |e| matches!(e, SessionEvent::DeckReplenished { .. })).await;
        assert_eq!(
            event,
            SessionEvent::DeckReplenished {
                added: 3,
                fallback: true
            },
            "round {round}"
        );
        assert_eq!(session.deck_len(), 3);
    }

    // Cards still queued, so a manual refresh adds nothing new.
    assert_eq!(session.refresh().await, 0);
    assert_eq!(session.deck_len(), 3);
}

#[tokio::test(start_paused = true)]
async fn scenario_unread_and_alerts_follow_focus() {
    let (h, id) = matched_harness(ScriptedResponder::echo()).await;

    // Conversation open and visible: no unread, no alert.
    assert!(h.session.open_conversation(id));
    let reply = h.session.send_message(id, "hi").unwrap().reply().await.unwrap();
    assert_eq!(reply.text, "re: hi");
    assert_eq!(h.session.get_match(id).unwrap().unread_count, 0);
    assert!(h.alerts.alerts().is_empty());

    // Closed: the reply counts as unread and raises an alert.
    h.session.close_conversation();
    h.session.send_message(id, "still there?").unwrap().reply().await.unwrap();
    assert_eq!(h.session.get_match(id).unwrap().unread_count, 1);
    assert_eq!(h.session.total_unread(), 1);

    let alerts = h.alerts.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].title, "Message from Name-p1");
    assert_eq!(alerts[0].body, "re: still there?");
    assert_eq!(alerts[0].icon.as_deref(), Some("https://img/p1/0.jpg"));

    // Reopening resets the count.
    h.session.open_conversation(id);
    assert_eq!(h.session.total_unread(), 0);
}

#[tokio::test(start_paused = true)]
async fn scenario_reply_after_undo_is_dropped() {
    let gate = Arc::new(Notify::new());
    let (h, id) = matched_harness(ScriptedResponder::gated(gate.clone())).await;

    let pending = h.session.send_message(id, "hey").unwrap();
    assert!(h.session.is_composing(id));

    h.session.undo().unwrap();
    assert!(h.session.get_match(id).is_none());
    assert!(!h.session.is_composing(id));

    gate.notify_one();
    assert!(pending.reply().await.is_none());
    assert!(h.session.matches().is_empty());
    assert!(h.alerts.alerts().is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn undo_twice_equals_undo_once() {
    let (h, id) = matched_harness(ScriptedResponder::echo()).await;
    assert!(h.session.undo().is_some());
    let deck_after_one = h.session.deck_len();

    assert!(h.session.undo().is_none());
    assert_eq!(h.session.deck_len(), deck_after_one);
    assert!(h.session.get_match(id).is_none());
    assert_eq!(h.persistence.removed.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn undo_slot_holds_only_last_decision() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2", "p3"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::new([0.9, 0.1]),
    );
    h.session.replenish().await;

    let first = h.session.swipe(Direction::Accept).await;
    let first_match = first.matched().unwrap().id;
    h.session.swipe(Direction::Accept).await;

    let undone = h.session.undo().unwrap();
    assert_eq!(undone.profile.id.as_str(), "p2");
    assert!(undone.match_id.is_none());
    // The earlier match survives; single level only.
    assert!(h.session.get_match(first_match).is_some());
    assert!(h.session.undo().is_none());
}

#[tokio::test(start_paused = true)]
async fn draw_at_threshold_does_not_match() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::new([0.4, 0.4000001]),
    );
    h.session.replenish().await;

    assert!(h.session.swipe(Direction::Accept).await.matched().is_none());
    assert!(h.session.swipe(Direction::Accept).await.matched().is_some());
}

#[tokio::test(start_paused = true)]
async fn deck_shrinks_by_one_per_decision() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2", "p3", "p4"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.0),
    );
    h.session.replenish().await;

    for expected in [3, 2, 1] {
        h.session.swipe(Direction::Reject).await;
        assert_eq!(h.session.deck_len(), expected);
    }
}

#[tokio::test(start_paused = true)]
async fn empty_deck_replenishes_automatically_and_filters_decided() {
    let h = harness(
        vec![Ok(batch(&["p1"])), Ok(batch(&["p1", "p2"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.0),
    );
    h.session.replenish().await;
    let mut rx = h.session.subscribe();

    h.session.swipe(Direction::Reject).await;
    let event = next_matching(&mut rx, |e| matches!(e, SessionEvent::DeckReplenished { .. })).await;
    assert_eq!(
        event,
        SessionEvent::DeckReplenished {
            added: 1,
            fallback: false
        }
    );
    assert_eq!(h.session.deck_len(), 1);
    assert_eq!(h.session.current_profile().unwrap().id.as_str(), "p2");
    assert_eq!(h.supply.calls(), vec![5, 5]);
}

#[tokio::test(start_paused = true)]
async fn supply_order_is_preserved() {
    let h = harness(
        vec![Ok(vec![
            profile("a", true, 3),
            profile("b", true, 1),
            profile("c", false, 2),
        ])],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.0),
    );
    h.session.replenish().await;

    let mut order = Vec::new();
    while order.len() < 3 {
        order.push(h.session.current_profile().unwrap().id.0.clone());
        h.session.swipe(Direction::Reject).await;
    }
    assert_eq!(order, ["a", "b", "c"]);
}

#[tokio::test(start_paused = true)]
async fn swipes_are_rejected_while_settling() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.0),
    );
    h.session.replenish().await;

    let first = tokio::spawn({
        let session = h.session.clone();
        async move { session.swipe(Direction::Reject).await }
    });
    tokio::task::yield_now().await;

    assert!(h.session.is_settling());
    assert!(h.session.card_pose().animating_out);
    assert_eq!(h.session.card_pose().offset, -1000.0);
    assert_eq!(h.session.swipe(Direction::Accept).await, SwipeOutcome::Ignored);
    assert!(!h.session.start_gesture());
    assert!(h.session.undo().is_none());

    assert!(matches!(first.await.unwrap(), SwipeOutcome::Decided { .. }));
    assert!(!h.session.is_settling());
    assert_eq!(h.session.deck_len(), 1);
}

#[tokio::test(start_paused = true)]
async fn drag_commits_past_threshold_and_snaps_back_under_it() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.9),
    );
    h.session.replenish().await;

    assert!(h.session.start_gesture());
    let pose = h.session.drag_to(90.0).unwrap();
    assert!((pose.rotation_deg - 4.5).abs() < 1e-4);
    assert_eq!(h.session.end_gesture().await, SwipeOutcome::SnappedBack);
    assert_eq!(h.session.deck_len(), 2);
    assert_eq!(h.session.card_pose().offset, 0.0);

    assert!(h.session.start_gesture());
    h.session.drag_to(140.0);
    let outcome = h.session.end_gesture().await;
    assert!(outcome.matched().is_some());
    assert_eq!(h.session.deck_len(), 1);
}

#[tokio::test(start_paused = true)]
async fn gesture_on_empty_deck_is_ignored_and_restocks() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.9),
    );
    let mut rx = h.session.subscribe();

    assert!(!h.session.start_gesture());
    assert_eq!(h.session.swipe(Direction::Accept).await, SwipeOutcome::Ignored);
    assert!(h.session.undo().is_none());

    let event = next_matching(&mut rx, |e| matches!(e, SessionEvent::DeckReplenished { .. })).await;
    assert_eq!(
        event,
        SessionEvent::DeckReplenished {
            added: 2,
            fallback: false
        }
    );
    // One fetch, however many operations found the deck empty.
    assert_eq!(h.supply.calls(), vec![5]);
    assert!(h.session.start_gesture());
}

#[tokio::test(start_paused = true)]
async fn fresh_session_loads_its_first_batch() {
    let h = harness(
        vec![Ok(batch(&["p1"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.0),
    );
    let mut rx = h.session.subscribe();

    assert!(h.session.current_profile().is_none());
    next_matching(&mut rx, |e| matches!(e, SessionEvent::DeckReplenished { .. })).await;
    assert_eq!(h.session.current_profile().unwrap().id.as_str(), "p1");
    assert_eq!(h.supply.calls(), vec![5]);
}

#[tokio::test(start_paused = true)]
async fn send_then_reply_appends_two_messages_in_order() {
    let (h, id) = matched_harness(ScriptedResponder::echo()).await;
    let mut rx = h.session.subscribe();

    let pending = h.session.send_message(id, "first!").unwrap();
    assert_eq!(pending.message.sender, SenderId::SessionUser);
    pending.reply().await.unwrap();

    let conversation = h.session.conversation(id).unwrap();
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation[0].text, "first!");
    assert!(conversation[0].sender.is_session_user());
    assert_eq!(conversation[1].text, "re: first!");
    assert_eq!(
        conversation[1].sender,
        SenderId::Counterpart(ProfileId::new("p1"))
    );
    assert!(conversation[0].timestamp <= conversation[1].timestamp);

    let m = h.session.get_match(id).unwrap();
    assert_eq!(m.last_message.as_deref(), Some("re: first!"));
    assert_eq!(m.unread_count, 1);
    assert!(!h.session.is_composing(id));

    let event = next_matching(&mut rx, |e| {
        matches!(e, SessionEvent::ComposingChanged { composing: false, .. })
    })
    .await;
    assert_eq!(
        event,
        SessionEvent::ComposingChanged {
            match_id: id,
            composing: false
        }
    );
    assert_eq!(
        *h.persistence.messages.lock().unwrap(),
        vec!["first!".to_string(), "re: first!".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn responder_receives_persona_and_prior_history() {
    let responder = ScriptedResponder::echo();
    let (h, id) = matched_harness(responder.clone()).await;

    h.session.send_message(id, "one").unwrap().reply().await;
    h.session.send_message(id, "two").unwrap().reply().await;

    let seen = responder.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[0],
        ("one".to_string(), "Name-p1".to_string(), Vec::<ChatTurn>::new())
    );
    assert_eq!(seen[1].0, "two");
    assert_eq!(
        seen[1].2,
        vec![
            ChatTurn::new(Role::User, "one"),
            ChatTurn::new(Role::Model, "re: one")
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn composing_holds_until_every_reply_lands() {
    let gate = Arc::new(Notify::new());
    let (h, id) = matched_harness(ScriptedResponder::gated(gate.clone())).await;
    let mut rx = h.session.subscribe();

    let first = h.session.send_message(id, "one").unwrap();
    let second = h.session.send_message(id, "two").unwrap();
    assert!(h.session.is_composing(id));

    gate.notify_one();
    assert_eq!(first.reply().await.unwrap().text, "re: one");
    assert!(h.session.is_composing(id));

    gate.notify_one();
    assert_eq!(second.reply().await.unwrap().text, "re: two");
    assert!(!h.session.is_composing(id));

    let mut changes = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let SessionEvent::ComposingChanged { composing, .. } = event {
            changes.push(composing);
        }
    }
    assert_eq!(changes, vec![true, false]);
}

#[tokio::test(start_paused = true)]
async fn responder_failure_stores_apology() {
    let (h, id) = matched_harness(ScriptedResponder::fixed(Err(ContentError::EmptyResponse))).await;
    let reply = h.session.send_message(id, "hello?").unwrap().reply().await.unwrap();
    assert_eq!(reply.text, RESPONDER_APOLOGY);
    assert!(!h.session.is_composing(id));
}

#[tokio::test(start_paused = true)]
async fn empty_reply_becomes_placeholder() {
    let (h, id) = matched_harness(ScriptedResponder::fixed(Ok("  ".into()))).await;
    let reply = h.session.send_message(id, "hello?").unwrap().reply().await.unwrap();
    assert_eq!(reply.text, EMPTY_REPLY_PLACEHOLDER);
}

#[tokio::test(start_paused = true)]
async fn blank_messages_are_rejected() {
    let responder = ScriptedResponder::echo();
    let (h, id) = matched_harness(responder.clone()).await;

    assert!(matches!(
        h.session.send_message(id, "   "),
        Err(StoreError::EmptyMessage)
    ));
    assert!(matches!(
        h.session.send_message(MatchId::new(), "hi"),
        Err(StoreError::MatchNotFound(_))
    ));
    assert!(h.session.conversation(id).unwrap().is_empty());
    assert!(responder.seen.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn reply_sees_profile_replaced_in_flight() {
    let gate = Arc::new(Notify::new());
    let (h, id) = matched_harness(ScriptedResponder::gated(gate.clone())).await;
    h.session.set_screen(Screen::Swipe);

    let pending = h.session.send_message(id, "hey").unwrap();
    let mut edited = profile("p1", true, 1);
    edited.name = "Renamed".into();
    assert_eq!(h.session.replace_profile(edited), 1);

    gate.notify_one();
    pending.reply().await.unwrap();
    assert_eq!(h.alerts.alerts()[0].title, "Message from Renamed");
}

#[tokio::test(start_paused = true)]
async fn hidden_app_alerts_even_with_chat_open() {
    let (h, id) = matched_harness(ScriptedResponder::echo()).await;
    h.session.open_conversation(id);
    h.session.set_app_visible(false);

    h.session.send_message(id, "yo").unwrap().reply().await.unwrap();
    assert_eq!(h.alerts.alerts().len(), 1);
    assert_eq!(h.session.get_match(id).unwrap().unread_count, 1);
}

#[tokio::test(start_paused = true)]
async fn no_alert_without_permission_or_when_sink_fails() {
    let (h, id) = matched_harness(ScriptedResponder::echo()).await;
    h.session.set_notifications_permitted(false);
    h.session.send_message(id, "yo").unwrap().reply().await.unwrap();
    assert!(h.alerts.alerts().is_empty());

    let session = Session::builder(SessionConfig::default())
        .supply(ScriptedSupply::new(vec![Ok(batch(&["p1"]))]))
        .responder(ScriptedResponder::echo())
        .alerts(Arc::new(BrokenAlerts))
        .draw(ScriptedDraw::always(0.9))
        .build();
    session.replenish().await;
    let id = session.swipe(Direction::Accept).await.matched().unwrap().id;
    let reply = session.send_message(id, "hi").unwrap().reply().await;
    assert!(reply.is_some());
}

#[tokio::test(start_paused = true)]
async fn refresh_appends_while_deck_not_empty() {
    let h = harness(
        vec![Ok(batch(&["p1", "p2"])), Ok(batch(&["p2", "p3"]))],
        ScriptedResponder::echo(),
        ScriptedDraw::always(0.0),
    );
    h.session.replenish().await;
    assert_eq!(h.session.refresh().await, 1);
    assert_eq!(h.session.deck_len(), 3);
}

#[tokio::test(start_paused = true)]
async fn report_goes_to_persistence() {
    let (h, _) = matched_harness(ScriptedResponder::echo()).await;
    let report = h
        .session
        .report_profile(ProfileId::new("p2"), ReportReason::ScamOrSpam, Some(" ".into()));
    assert!(report.details.is_none());

    let reports = h.persistence.reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].reason.label(), "Scam / Spam");
}

#[tokio::test(start_paused = true)]
async fn undo_closes_the_removed_conversation() {
    let (h, id) = matched_harness(ScriptedResponder::echo()).await;
    h.session.open_conversation(id);
    h.session.undo();

    let view = h.session.view_settings();
    assert_eq!(view.screen, Screen::Matches);
}
