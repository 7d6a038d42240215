//! The redirect decision engine.
//!
//! One process-wide decision authority reconciles three independently-firing
//! observation points — "gesture ended with kinematics", "about to start the
//! default secondary view", "gesture settled" — into a single consistent
//! decision per gesture. The call sites run on arbitrary host threads with
//! no ordering guarantee, so all mutable state sits behind a single mutex
//! and every multi-field transition is one critical section.
//!
//! No operation blocks beyond the lock, suspends, or returns an error: a
//! failing collaborator degrades to the safe default and is logged.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::arming::{ArmState, INITIAL_BYPASS_BUDGET};
use crate::collab::{
    Destination, GestureHandle, HomeLauncher, HomeResolver, LaunchStatus, Resolution,
    SecondaryViewService,
};
use crate::events::Event;
use crate::outcome::OutcomeClass;
use crate::predictor::{classify, is_home_swipe, EndTargetPredictor, GestureVector};
use crate::token::{GestureToken, TokenRegistry};

/// Verdict for the call site about to start the default secondary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectDecision {
    /// Let the default transition run.
    Proceed,
    /// Home was activated early; the caller neutralizes the default
    /// transition's own result instead of proceeding.
    Suppress,
}

/// Settlement caps the remaining budget at one instead of clearing it,
/// leaving a single redirect available for a late recents start. Kept for
/// compatibility with observed device behavior; a policy constant, not a
/// derived invariant.
const SETTLED_BUDGET_CAP: u8 = 1;

/// Diagnostic backlog limit; oldest entries drop first.
const EVENT_QUEUE_CAP: usize = 256;

#[derive(Debug, Default)]
struct EngineState {
    registry: TokenRegistry,
    arm: ArmState,
    /// Most recent token for which home was actually launched. Makes
    /// activation idempotent per gesture; the empty token disables the
    /// check (deliberate fallback for underivable tokens).
    launch_memo: GestureToken,
    last_predict_home: Option<DateTime<Utc>>,
    last_predict_recents: Option<DateTime<Utc>>,
    events: VecDeque<Event>,
}

impl EngineState {
    fn push_event(&mut self, event: Event) {
        if self.events.len() == EVENT_QUEUE_CAP {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn clear_arm(&mut self, reason: &str) {
        if self.arm.is_armed() {
            tracing::info!(
                "clear arm: {} (token={}, budget={})",
                reason,
                self.arm.token(),
                self.arm.budget()
            );
        }
        self.arm.clear();
        self.push_event(Event::Cleared {
            reason: reason.to_string(),
            at: Utc::now(),
        });
    }

    fn stamp_prediction(&mut self, outcome: OutcomeClass) {
        let now = Utc::now();
        match outcome {
            OutcomeClass::Home => self.last_predict_home = Some(now),
            OutcomeClass::Recents => self.last_predict_recents = Some(now),
            OutcomeClass::Other | OutcomeClass::Unknown => return,
        }
        tracing::debug!("predicted {:?}", outcome);
        self.push_event(Event::Predicted { outcome, at: now });
    }
}

/// Single process-wide decision/arming authority.
///
/// Constructed once with the package owning the default secondary view and
/// the platform collaborator seams; shared across all observation points.
pub struct RedirectEngine {
    secondary_owner: String,
    predictor: Arc<dyn EndTargetPredictor + Send + Sync>,
    home: Arc<dyn HomeResolver + Send + Sync>,
    launcher: Arc<dyn HomeLauncher + Send + Sync>,
    secondary: Arc<dyn SecondaryViewService + Send + Sync>,
    state: Mutex<EngineState>,
}

impl RedirectEngine {
    pub fn new(
        secondary_owner: impl Into<String>,
        predictor: Arc<dyn EndTargetPredictor + Send + Sync>,
        home: Arc<dyn HomeResolver + Send + Sync>,
        launcher: Arc<dyn HomeLauncher + Send + Sync>,
        secondary: Arc<dyn SecondaryViewService + Send + Sync>,
    ) -> Self {
        Self {
            secondary_owner: secondary_owner.into(),
            predictor,
            home,
            launcher,
            secondary,
            state: Mutex::new(EngineState::default()),
        }
    }

    // ── Observation points ───────────────────────────────────────────

    /// "Gesture ended with kinematics" — the early observation point.
    ///
    /// Derives the gesture token (clearing any stale arm on a gesture
    /// boundary), classifies the outcome with both fling-flag values, and —
    /// on an aggregate home prediction for a genuine upward swipe with an
    /// alternate home destination active — arms the bypass and activates
    /// home immediately.
    pub fn on_gesture_ended(
        &self,
        gesture: &dyn GestureHandle,
        velocity: f32,
        vector: GestureVector,
    ) {
        let Some(mut state) = self.locked() else {
            return;
        };

        let token = gesture.token();
        if state.registry.observe(token) {
            state.clear_arm("new gesture");
        }

        let outcome = classify(vector, velocity, self.predictor.as_ref());
        state.stamp_prediction(outcome);

        if outcome != OutcomeClass::Home {
            return;
        }
        if !is_home_swipe(vector) {
            tracing::debug!(
                "predicted home but vector ({}, {}) fails the swipe gate",
                vector.x,
                vector.y
            );
            return;
        }
        let Some(destination) = self.alternate_home() else {
            return;
        };

        if state.arm.arm(token, INITIAL_BYPASS_BUDGET) {
            let budget = state.arm.budget();
            state.push_event(Event::Armed {
                token,
                budget,
                at: Utc::now(),
            });
            tracing::info!(
                "armed direct-home bypass: token={} budget={} home={}",
                token,
                state.arm.budget(),
                destination
            );
        }

        gesture.set_end_target(OutcomeClass::Home);
        // Home starts now rather than after the animation settles.
        self.maybe_launch(&mut state, token, &destination);
        self.secondary.acknowledge_finished();
    }

    /// "About to start the default secondary view" — the redirect decision
    /// point.
    ///
    /// On `Suppress` the caller is expected to neutralize the default
    /// transition's own result. Deliberately side-effect-light: no forceful
    /// teardown of in-flight animation state.
    pub fn on_recents_start(&self, current: GestureToken) -> RedirectDecision {
        let Some(mut state) = self.locked() else {
            return RedirectDecision::Proceed;
        };
        let Some(destination) = self.alternate_home() else {
            return RedirectDecision::Proceed;
        };
        if !state.arm.is_armed_for(current) {
            return RedirectDecision::Proceed;
        }

        self.secondary.acknowledge_finished();
        let armed = state.arm.token();
        self.maybe_launch(&mut state, armed, &destination);

        state.arm.consume();
        let remaining = state.arm.budget();
        let now = Utc::now();
        state.push_event(Event::BypassConsumed {
            token: armed,
            remaining,
            at: now,
        });
        state.push_event(Event::Redirected { token: armed, at: now });
        tracing::info!(
            "blocked secondary-view start -> home (token={}, budget left={})",
            armed,
            remaining
        );
        if remaining == 0 {
            state.clear_arm("budget exhausted");
        }

        RedirectDecision::Suppress
    }

    /// "Gesture settled with final outcome" — the authoritative end state,
    /// against which the early prediction was a guess.
    ///
    /// Confirmation only: light acknowledgment plus a budget cap. Never
    /// arms, never launches — an outcome mismatch means the early
    /// prediction was wrong and must not force behavior.
    pub fn on_settled(&self, final_outcome: OutcomeClass, current: GestureToken) {
        if final_outcome != OutcomeClass::Home {
            return;
        }
        let Some(mut state) = self.locked() else {
            return;
        };
        if self.alternate_home().is_none() {
            return;
        }

        self.secondary.acknowledge_finished();
        state.arm.bound(SETTLED_BUDGET_CAP);
        let bounded_budget = state.arm.budget();
        state.push_event(Event::Settled {
            token: current,
            bounded_budget,
            at: Utc::now(),
        });
        tracing::info!(
            "settled home (token={}), bounded bypass budget to {}",
            current,
            state.arm.budget()
        );
    }

    /// Advisory trace of the authoritative predictor call site. Stamps the
    /// last-predicted timestamps and the diagnostic stream; gates nothing.
    pub fn observe_prediction(&self, outcome: OutcomeClass) {
        let Some(mut state) = self.locked() else {
            return;
        };
        state.stamp_prediction(outcome);
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Snapshot of the current arm state.
    pub fn arm_state(&self) -> ArmState {
        self.locked().map(|state| state.arm).unwrap_or_default()
    }

    /// Last-predicted timestamps (home, recents). Diagnostic only.
    pub fn last_predictions(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        self.locked()
            .map(|state| (state.last_predict_home, state.last_predict_recents))
            .unwrap_or((None, None))
    }

    /// Hand the diagnostic backlog to the front end.
    pub fn drain_events(&self) -> Vec<Event> {
        self.locked()
            .map(|mut state| state.events.drain(..).collect())
            .unwrap_or_default()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn locked(&self) -> Option<MutexGuard<'_, EngineState>> {
        match self.state.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                tracing::warn!("engine state lock poisoned; skipping operation");
                None
            }
        }
    }

    /// Default home destination, when one exists and it is not owned by the
    /// secondary-view owner.
    fn alternate_home(&self) -> Option<Destination> {
        match self.home.resolve_default_home() {
            Resolution::Resolved(destination) => {
                if destination.package == self.secondary_owner {
                    None
                } else {
                    Some(destination)
                }
            }
            Resolution::Absent => None,
            Resolution::Unavailable => {
                tracing::warn!("default home resolver unavailable");
                None
            }
        }
    }

    /// Launch home at most once per token; the empty token always launches.
    fn maybe_launch(
        &self,
        state: &mut EngineState,
        token: GestureToken,
        destination: &Destination,
    ) {
        if !token.is_none() && state.launch_memo == token {
            return;
        }
        match self.launcher.launch(destination) {
            LaunchStatus::Launched => {
                if !token.is_none() {
                    state.launch_memo = token;
                }
                state.push_event(Event::HomeLaunched {
                    token,
                    destination: destination.to_string(),
                    at: Utc::now(),
                });
                tracing::info!("started home {} for token={}", destination, token);
            }
            LaunchStatus::Failed => {
                tracing::warn!("home launch failed for {}", destination);
            }
        }
    }
}
