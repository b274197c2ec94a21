//! The session handle: authoritative state plus its collaborators.
//!
//! Operations are implemented on [`Session`] across the `commands` modules.
//! A `Session` is cheap to clone; clones share one state, so spawned
//! continuations always see the latest state rather than a snapshot.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use divine_content::{OfflineContent, ProfileSupply, Responder};

use crate::config::SessionConfig;
use crate::events::{SessionEvent, EVENT_CHANNEL_CAPACITY};
use crate::matching::{DrawSource, ThreadRngDraw};
use crate::notifications::{AlertSink, LogAlerts, NotificationDispatcher};
use crate::persistence::{NoPersistence, PersistenceSink};
use crate::state::SessionState;

#[derive(Clone)]
pub struct Session {
    pub(crate) config: Arc<SessionConfig>,
    pub(crate) state: Arc<Mutex<SessionState>>,
    pub(crate) supply: Arc<dyn ProfileSupply>,
    pub(crate) responder: Arc<dyn Responder>,
    pub(crate) notifier: NotificationDispatcher,
    pub(crate) persistence: Arc<dyn PersistenceSink>,
    pub(crate) events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn builder(config: SessionConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Lock the session state. A poisoned lock is recovered; every critical
    /// section leaves the state consistent before it can panic.
    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Wires collaborators into a [`Session`]. Anything not set falls back to
/// an offline or logging implementation.
pub struct SessionBuilder {
    config: SessionConfig,
    supply: Arc<dyn ProfileSupply>,
    responder: Arc<dyn Responder>,
    alerts: Arc<dyn AlertSink>,
    persistence: Arc<dyn PersistenceSink>,
    draw: Box<dyn DrawSource>,
}

impl SessionBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            supply: Arc::new(OfflineContent),
            responder: Arc::new(OfflineContent),
            alerts: Arc::new(LogAlerts),
            persistence: Arc::new(NoPersistence),
            draw: Box::new(ThreadRngDraw),
        }
    }

    pub fn supply(mut self, supply: Arc<dyn ProfileSupply>) -> Self {
        self.supply = supply;
        self
    }

    pub fn responder(mut self, responder: Arc<dyn Responder>) -> Self {
        self.responder = responder;
        self
    }

    pub fn alerts(mut self, alerts: Arc<dyn AlertSink>) -> Self {
        self.alerts = alerts;
        self
    }

    pub fn persistence(mut self, persistence: Arc<dyn PersistenceSink>) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn draw(mut self, draw: impl DrawSource + 'static) -> Self {
        self.draw = Box::new(draw);
        self
    }

    pub fn build(self) -> Session {
        let state = SessionState::new(&self.config, self.draw);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Session {
            config: Arc::new(self.config),
            state: Arc::new(Mutex::new(state)),
            supply: self.supply,
            responder: self.responder,
            notifier: NotificationDispatcher::new(self.alerts),
            persistence: self.persistence,
            events,
        }
    }
}
