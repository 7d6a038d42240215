//! Outcome prediction aggregation and the kinematic arming gate.

use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeClass;

/// Raw end-of-gesture displacement in screen space. Negative `y` points up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureVector {
    pub x: f32,
    pub y: f32,
}

impl GestureVector {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Result of one underlying predictor invocation.
///
/// A failing collaborator degrades to `Failed` here and never propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Predicted(OutcomeClass),
    Failed,
}

/// Platform-side end-target prediction, reached through the adapter layer.
pub trait EndTargetPredictor {
    fn predict(&self, vector: GestureVector, velocity: f32, fling: bool) -> Prediction;
}

/// Minimum upward displacement before a vector counts as a deliberate swipe.
const SWIPE_NOISE_FLOOR: f32 = 8.0;

/// True for a genuine upward swipe: vertical component past the noise floor
/// and at least as large as the horizontal one. Quick-switch style sideways
/// gestures must never qualify.
pub fn is_home_swipe(vector: GestureVector) -> bool {
    vector.y < -SWIPE_NOISE_FLOOR && vector.y.abs() >= vector.x.abs()
}

/// Aggregate two boundary-condition predictions into one classification.
///
/// The correct fling flag is not always known at the early observation
/// point, so the predictor runs once with each value. If either invocation
/// yields `Home`, the aggregate is `Home`; else if either yields `Recents`,
/// the aggregate is `Recents`; anything else is `Unknown`. Purely
/// computational; a failure in one invocation degrades only that invocation.
pub fn classify(
    vector: GestureVector,
    velocity: f32,
    predictor: &dyn EndTargetPredictor,
) -> OutcomeClass {
    let slow = outcome_of(predictor.predict(vector, velocity, false));
    let fling = outcome_of(predictor.predict(vector, velocity, true));

    if slow == OutcomeClass::Home || fling == OutcomeClass::Home {
        OutcomeClass::Home
    } else if slow == OutcomeClass::Recents || fling == OutcomeClass::Recents {
        OutcomeClass::Recents
    } else {
        OutcomeClass::Unknown
    }
}

fn outcome_of(prediction: Prediction) -> OutcomeClass {
    match prediction {
        Prediction::Predicted(outcome) => outcome,
        Prediction::Failed => OutcomeClass::Unknown,
    }
}
