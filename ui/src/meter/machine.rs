//! Per-mount lifecycle of the mood meter.
//!
//! ```text
//! Idle → AwaitingRoute → InvalidSession
//!                      → Subscribing → Loading → Rendering | NoData | Error
//! ```
//!
//! `Rendering` and `NoData` are re-entered on every snapshot while the
//! subscription lives. A changed session resets to `Idle` and subscribes
//! again under a new generation; events from older generations are dropped.

use dioxus::logger::tracing::{debug, error};

use crate::core::session::{resolve, Resolution, RouteState, SessionId};
use crate::core::store::{MoodQuery, StoreError, StoreEvent};
use crate::core::tally::EmotionGrid;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MeterPhase {
    #[default]
    Idle,
    AwaitingRoute,
    InvalidSession,
    Subscribing,
    Loading,
    Rendering(EmotionGrid),
    NoData,
    /// Terminal for the subscription; carries the cause.
    Error(String),
}

/// What the view has to do with the subscription handle after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeterAction {
    Nothing,
    /// Release any current handle, then subscribe under `generation`.
    Subscribe { query: MoodQuery, generation: u64 },
    Release,
}

/// User-visible message shown in place of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loading,
    InvalidSession,
    NoData,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeterMachine {
    phase: MeterPhase,
    session: Option<SessionId>,
    generation: u64,
}

impl MeterMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &MeterPhase {
        &self.phase
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mount(&mut self) {
        if self.phase == MeterPhase::Idle {
            self.phase = MeterPhase::AwaitingRoute;
        }
    }

    /// Evaluate a routing update.
    pub fn route(&mut self, route: &RouteState) -> MeterAction {
        match resolve(route) {
            Resolution::Indeterminate => {
                self.mount();
                MeterAction::Nothing
            }
            Resolution::Invalid => {
                debug!("result route has no usable session id");
                self.session = None;
                self.generation += 1;
                self.phase = MeterPhase::InvalidSession;
                MeterAction::Release
            }
            Resolution::Valid(session) => {
                if self.session.as_ref() == Some(&session) && self.is_live() {
                    return MeterAction::Nothing;
                }

                self.phase = MeterPhase::Idle;
                self.generation += 1;
                self.session = Some(session.clone());
                self.phase = MeterPhase::Subscribing;
                debug!(
                    "subscribing to session {session} (generation {})",
                    self.generation
                );
                MeterAction::Subscribe {
                    query: MoodQuery::for_session(session),
                    generation: self.generation,
                }
            }
        }
    }

    /// The store accepted the subscription.
    pub fn opened(&mut self, generation: u64) {
        if generation == self.generation && self.phase == MeterPhase::Subscribing {
            self.phase = MeterPhase::Loading;
        }
    }

    /// The store refused the subscription outright.
    pub fn open_failed(&mut self, generation: u64, err: &StoreError) {
        if generation == self.generation {
            error!("could not subscribe to mood entries: {err}");
            self.phase = MeterPhase::Error(err.to_string());
        }
    }

    /// Apply a store event delivered under `generation`.
    pub fn deliver(&mut self, generation: u64, event: StoreEvent) -> MeterAction {
        let Some(session) = self.session.as_ref() else {
            debug!("discarding store event without an active session");
            return MeterAction::Nothing;
        };
        if generation != self.generation {
            debug!(
                "discarding stale store event (generation {generation}, current {})",
                self.generation
            );
            return MeterAction::Nothing;
        }
        if matches!(self.phase, MeterPhase::Error(_)) {
            return MeterAction::Nothing;
        }

        match event {
            StoreEvent::Snapshot(entries) => {
                let grid = EmotionGrid::from_entries(
                    entries.iter().filter(|entry| entry.belongs_to(session)),
                );
                self.phase = if grid.is_empty() {
                    MeterPhase::NoData
                } else {
                    MeterPhase::Rendering(grid)
                };
                MeterAction::Nothing
            }
            StoreEvent::Failed(err) => {
                error!("error fetching mood data: {err}");
                self.phase = MeterPhase::Error(err.to_string());
                MeterAction::Release
            }
        }
    }

    /// Unmount: forget the session and invalidate in-flight events.
    pub fn teardown(&mut self) -> MeterAction {
        self.session = None;
        self.generation += 1;
        self.phase = MeterPhase::Idle;
        MeterAction::Release
    }

    pub fn notice(&self) -> Option<Notice> {
        match &self.phase {
            MeterPhase::Rendering(_) => None,
            MeterPhase::Idle
            | MeterPhase::AwaitingRoute
            | MeterPhase::Subscribing
            | MeterPhase::Loading => Some(Notice::Loading),
            MeterPhase::InvalidSession => Some(Notice::InvalidSession),
            MeterPhase::NoData => Some(Notice::NoData),
            MeterPhase::Error(cause) => Some(Notice::Failed(cause.clone())),
        }
    }

    pub fn grid(&self) -> Option<&EmotionGrid> {
        match &self.phase {
            MeterPhase::Rendering(grid) => Some(grid),
            _ => None,
        }
    }

    fn is_live(&self) -> bool {
        matches!(
            self.phase,
            MeterPhase::Subscribing
                | MeterPhase::Loading
                | MeterPhase::Rendering(_)
                | MeterPhase::NoData
        )
    }
}
