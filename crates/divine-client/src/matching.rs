//! Match decision: an accept becomes a match on a winning draw.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use divine_shared::{Direction, SwipeDecision};
use divine_store::{ConversationStore, Match};

use crate::config::MatchPolicy;

/// Source of uniform draws in `[0, 1)`.
pub trait DrawSource: Send {
    fn draw(&mut self) -> f64;
}

/// Draws from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngDraw;

impl DrawSource for ThreadRngDraw {
    fn draw(&mut self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// Reproducible draws from a seeded RNG.
#[derive(Debug, Clone)]
pub struct SeededDraw(StdRng);

impl SeededDraw {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DrawSource for SeededDraw {
    fn draw(&mut self) -> f64 {
        self.0.gen()
    }
}

/// Replays fixed values in order, then repeats the last one.
#[derive(Debug, Clone)]
pub struct ScriptedDraw {
    values: VecDeque<f64>,
    last: f64,
}

impl ScriptedDraw {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 0.0,
        }
    }

    pub fn always(value: f64) -> Self {
        Self {
            values: VecDeque::new(),
            last: value,
        }
    }
}

impl DrawSource for ScriptedDraw {
    fn draw(&mut self) -> f64 {
        if let Some(v) = self.values.pop_front() {
            self.last = v;
        }
        self.last
    }
}

pub struct MatchEngine {
    policy: MatchPolicy,
    draw: Box<dyn DrawSource>,
}

impl MatchEngine {
    pub fn new(policy: MatchPolicy, draw: Box<dyn DrawSource>) -> Self {
        Self { policy, draw }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Evaluate a decision; on a match, insert it (and its empty
    /// conversation) at the head of `store`.
    ///
    /// Rejects never draw.
    pub fn evaluate(&mut self, decision: &SwipeDecision, store: &mut ConversationStore) -> Option<Match> {
        if decision.direction == Direction::Reject {
            return None;
        }

        let draw = self.draw.draw();
        if draw <= self.policy.match_threshold {
            debug!(profile = %decision.profile.id, draw, "Accept did not match");
            return None;
        }

        let m = store.insert_match(decision.profile.clone());
        info!(match_id = %m.id, profile = %m.profile.id, draw, "It's a match");
        Some(m)
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
