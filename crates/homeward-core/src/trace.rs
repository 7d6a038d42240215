//! Recorded signal traces and deterministic replay.
//!
//! A trace is a versioned document capturing the environment (secondary-view
//! owner, resolvable default home) and the sequence of navigation-intent
//! signals observed during one or more gestures. `ScriptedPlatform`
//! implements the collaborator seams from trace data so the CLI and
//! integration tests can drive the engine without a host platform.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::collab::{
    Destination, GestureHandle, HomeLauncher, HomeResolver, LaunchStatus, Resolution,
    SecondaryViewService,
};
use crate::engine::{RedirectDecision, RedirectEngine};
use crate::error::TraceError;
use crate::events::Event;
use crate::outcome::OutcomeClass;
use crate::predictor::{EndTargetPredictor, GestureVector, Prediction};
use crate::token::GestureToken;

/// Current trace format version. Major-version mismatches are rejected.
pub const TRACE_VERSION: &str = "1.0";

/// Scripted predictor outcome for each fling-flag value. `None` means that
/// invocation fails.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScriptedPrediction {
    pub without_fling: Option<OutcomeClass>,
    pub with_fling: Option<OutcomeClass>,
}

/// One recorded navigation-intent signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    /// The gesture-end observation point fired with raw kinematics.
    GestureEnded {
        token: GestureToken,
        velocity: f32,
        x: f32,
        y: f32,
        predicted: ScriptedPrediction,
    },
    /// The host is about to start the default secondary view.
    RecentsStart { token: GestureToken },
    /// The gesture's authoritative end state became known.
    Settled {
        token: GestureToken,
        outcome: OutcomeClass,
    },
    /// Advisory prediction trace from the authoritative call site.
    Prediction { outcome: OutcomeClass },
}

/// The platform environment a trace was recorded under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEnvironment {
    /// Package owning the default secondary view.
    pub secondary_owner: String,
    /// Current default home destination; `None` when no home resolves.
    pub default_home: Option<Destination>,
}

/// A recorded sequence of signals plus its environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub version: String,
    pub environment: TraceEnvironment,
    pub signals: Vec<Signal>,
}

impl Trace {
    pub fn new(environment: TraceEnvironment, signals: Vec<Signal>) -> Self {
        Self {
            version: TRACE_VERSION.to_string(),
            environment,
            signals,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let trace: Trace = serde_json::from_str(json).map_err(TraceError::Parse)?;
        let expected_major = major_of(TRACE_VERSION);
        if major_of(&trace.version) != expected_major {
            return Err(TraceError::IncompatibleVersion {
                found: trace.version,
                expected: expected_major.to_string(),
            });
        }
        Ok(trace)
    }

    pub fn to_json(&self) -> Result<String, TraceError> {
        serde_json::to_string_pretty(self).map_err(TraceError::Parse)
    }
}

fn major_of(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

/// Collaborator seams backed by trace data.
///
/// Launches and acknowledgments are recorded for inspection; the scripted
/// prediction is swapped per gesture before each replayed gesture-end.
#[derive(Debug, Default)]
pub struct ScriptedPlatform {
    default_home: Option<Destination>,
    prediction: Mutex<ScriptedPrediction>,
    launches: Mutex<Vec<Destination>>,
    acknowledged: Mutex<usize>,
}

impl ScriptedPlatform {
    pub fn new(environment: &TraceEnvironment) -> Self {
        Self {
            default_home: environment.default_home.clone(),
            prediction: Mutex::new(ScriptedPrediction::default()),
            launches: Mutex::new(Vec::new()),
            acknowledged: Mutex::new(0),
        }
    }

    /// Swap in the scripted prediction for the next gesture.
    pub fn script(&self, prediction: ScriptedPrediction) {
        if let Ok(mut current) = self.prediction.lock() {
            *current = prediction;
        }
    }

    /// Destinations launched so far, in order.
    pub fn launches(&self) -> Vec<Destination> {
        self.launches
            .lock()
            .map(|launches| launches.clone())
            .unwrap_or_default()
    }

    /// Number of "transition finished" acknowledgments delivered.
    pub fn acknowledged(&self) -> usize {
        self.acknowledged.lock().map(|count| *count).unwrap_or(0)
    }
}

impl EndTargetPredictor for ScriptedPlatform {
    fn predict(&self, _vector: GestureVector, _velocity: f32, fling: bool) -> Prediction {
        let scripted = match self.prediction.lock() {
            Ok(current) => *current,
            Err(_) => return Prediction::Failed,
        };
        let outcome = if fling {
            scripted.with_fling
        } else {
            scripted.without_fling
        };
        match outcome {
            Some(outcome) => Prediction::Predicted(outcome),
            None => Prediction::Failed,
        }
    }
}

impl HomeResolver for ScriptedPlatform {
    fn resolve_default_home(&self) -> Resolution<Destination> {
        match &self.default_home {
            Some(destination) => Resolution::Resolved(destination.clone()),
            None => Resolution::Absent,
        }
    }
}

impl HomeLauncher for ScriptedPlatform {
    fn launch(&self, destination: &Destination) -> LaunchStatus {
        if let Ok(mut launches) = self.launches.lock() {
            launches.push(destination.clone());
        }
        LaunchStatus::Launched
    }
}

impl SecondaryViewService for ScriptedPlatform {
    fn acknowledge_finished(&self) {
        if let Ok(mut count) = self.acknowledged.lock() {
            *count += 1;
        }
    }
}

/// Gesture handle for replayed signals: a fixed token, no writable state.
struct ReplayGesture {
    token: GestureToken,
}

impl GestureHandle for ReplayGesture {
    fn token(&self) -> GestureToken {
        self.token
    }

    fn set_end_target(&self, _outcome: OutcomeClass) {}
}

/// Outcome of replaying one signal.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub signal: Signal,
    /// Redirect verdict, for `recents_start` signals only.
    pub decision: Option<RedirectDecision>,
}

/// Full result of a trace replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    pub events: Vec<Event>,
    pub launches: Vec<Destination>,
}

/// Drive a trace through a fresh engine backed by a scripted platform.
pub fn replay(trace: &Trace) -> ReplayReport {
    let platform = Arc::new(ScriptedPlatform::new(&trace.environment));
    let engine = RedirectEngine::new(
        trace.environment.secondary_owner.clone(),
        platform.clone(),
        platform.clone(),
        platform.clone(),
        platform.clone(),
    );

    let mut steps = Vec::with_capacity(trace.signals.len());
    for (index, signal) in trace.signals.iter().enumerate() {
        let decision = match signal {
            Signal::GestureEnded {
                token,
                velocity,
                x,
                y,
                predicted,
            } => {
                platform.script(*predicted);
                let gesture = ReplayGesture { token: *token };
                engine.on_gesture_ended(&gesture, *velocity, GestureVector::new(*x, *y));
                None
            }
            Signal::RecentsStart { token } => Some(engine.on_recents_start(*token)),
            Signal::Settled { token, outcome } => {
                engine.on_settled(*outcome, *token);
                None
            }
            Signal::Prediction { outcome } => {
                engine.observe_prediction(*outcome);
                None
            }
        };
        steps.push(ReplayStep {
            index,
            signal: signal.clone(),
            decision,
        });
    }

    ReplayReport {
        steps,
        events: engine.drain_events(),
        launches: platform.launches(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> Trace {
        Trace::new(
            TraceEnvironment {
                secondary_owner: "com.android.launcher".to_string(),
                default_home: Some(Destination::new("org.acme.launcher", ".Home")),
            },
            vec![
                Signal::GestureEnded {
                    token: GestureToken::new(42),
                    velocity: -5.0,
                    x: 1.0,
                    y: -20.0,
                    predicted: ScriptedPrediction {
                        without_fling: Some(OutcomeClass::Home),
                        with_fling: Some(OutcomeClass::Recents),
                    },
                },
                Signal::RecentsStart {
                    token: GestureToken::new(42),
                },
            ],
        )
    }

    #[test]
    fn json_round_trip() {
        let trace = sample_trace();
        let json = trace.to_json().unwrap();
        let parsed = Trace::from_json(&json).unwrap();
        assert_eq!(parsed.version, TRACE_VERSION);
        assert_eq!(parsed.signals.len(), 2);
        assert_eq!(
            parsed.environment.default_home,
            Some(Destination::new("org.acme.launcher", ".Home"))
        );
    }

    #[test]
    fn rejects_incompatible_major_version() {
        let mut trace = sample_trace();
        trace.version = "2.0".to_string();
        let json = trace.to_json().unwrap();
        let err = Trace::from_json(&json).unwrap_err();
        assert!(matches!(err, TraceError::IncompatibleVersion { .. }));
    }

    #[test]
    fn accepts_newer_minor_version() {
        let mut trace = sample_trace();
        trace.version = "1.5".to_string();
        let json = trace.to_json().unwrap();
        assert!(Trace::from_json(&json).is_ok());
    }

    #[test]
    fn replay_redirects_an_armed_gesture() {
        let report = replay(&sample_trace());
        assert_eq!(report.steps[1].decision, Some(RedirectDecision::Suppress));
        // One launch despite two launch sites: the memo absorbs the second.
        assert_eq!(report.launches.len(), 1);
        assert_eq!(report.launches[0].package, "org.acme.launcher");
    }

    #[test]
    fn replay_without_alternate_home_never_redirects() {
        let mut trace = sample_trace();
        trace.environment.default_home = None;
        let report = replay(&trace);
        assert_eq!(report.steps[1].decision, Some(RedirectDecision::Proceed));
        assert!(report.launches.is_empty());
    }
}
