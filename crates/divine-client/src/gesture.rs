//! Per-card gesture state machine.
//!
//! `Idle -> Dragging -> {commit, snap back}`. A commit drives the card
//! off-screen and parks the machine in `Settling` until the session
//! finalizes the decision after the settle delay.

use serde::Serialize;

use divine_shared::Direction;

use crate::config::GestureConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging { dx: f32 },
    Settling { direction: Direction },
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Not dragging; nothing happened.
    Ignored,
    /// Under the commit distance; offset reset with no decision.
    SnapBack,
    /// Card is leaving in this direction.
    Commit(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stamp {
    Like,
    Nope,
}

/// What a renderer needs to draw the active card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPose {
    pub offset: f32,
    pub rotation_deg: f32,
    pub stamp: Option<Stamp>,
    pub animating_out: bool,
}

#[derive(Debug, Clone)]
pub struct Gesture {
    config: GestureConfig,
    phase: GesturePhase,
}

impl Gesture {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, GesturePhase::Settling { .. })
    }

    /// Enter `Dragging` from `Idle`. Rejected while settling or already dragging.
    pub fn start(&mut self) -> bool {
        if self.phase != GesturePhase::Idle {
            return false;
        }
        self.phase = GesturePhase::Dragging { dx: 0.0 };
        true
    }

    /// Track the signed offset from the drag origin.
    pub fn drag_to(&mut self, dx: f32) -> bool {
        match &mut self.phase {
            GesturePhase::Dragging { dx: current } => {
                *current = dx;
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self) -> Release {
        let GesturePhase::Dragging { dx } = self.phase else {
            return Release::Ignored;
        };
        match Direction::from_offset(dx) {
            Some(direction) if dx.abs() > self.config.commit_distance => {
                self.phase = GesturePhase::Settling { direction };
                Release::Commit(direction)
            }
            _ => {
                self.phase = GesturePhase::Idle;
                Release::SnapBack
            }
        }
    }

    /// Programmatic commit, bypassing the drag. Rejected while settling.
    pub fn commit(&mut self, direction: Direction) -> bool {
        if self.is_settling() {
            return false;
        }
        self.phase = GesturePhase::Settling { direction };
        true
    }

    /// Leave `Settling` once the exit animation is done.
    pub fn finish_settle(&mut self) -> Option<Direction> {
        let GesturePhase::Settling { direction } = self.phase else {
            return None;
        };
        self.phase = GesturePhase::Idle;
        Some(direction)
    }

    /// Abandon any drag, e.g. when the active card changes underneath it.
    pub fn cancel_drag(&mut self) {
        if let GesturePhase::Dragging { .. } = self.phase {
            self.phase = GesturePhase::Idle;
        }
    }

    pub fn offset(&self) -> f32 {
        match self.phase {
            GesturePhase::Idle => 0.0,
            GesturePhase::Dragging { dx } => dx,
            GesturePhase::Settling { direction } => direction.sign() * self.config.offscreen_offset,
        }
    }

    pub fn pose(&self) -> CardPose {
        let offset = self.offset();
        let stamp = if offset > self.config.stamp_distance {
            Some(Stamp::Like)
        } else if offset < -self.config.stamp_distance {
            Some(Stamp::Nope)
        } else {
            None
        };
        CardPose {
            offset,
            rotation_deg: offset * self.config.rotation_per_unit,
            stamp,
            animating_out: self.is_settling(),
        }
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
