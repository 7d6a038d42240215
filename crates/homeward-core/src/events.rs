use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeClass;
use crate::token::GestureToken;

/// Every significant transition produces an Event. Front ends poll and
/// drain them; nothing in the core reads them back — the stream is
/// diagnostic, never control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A prediction observation point classified the gesture.
    Predicted {
        outcome: OutcomeClass,
        at: DateTime<Utc>,
    },
    /// The bypass was armed for a gesture.
    Armed {
        token: GestureToken,
        budget: u8,
        at: DateTime<Utc>,
    },
    /// One unit of bypass budget was spent at the redirect decision point.
    BypassConsumed {
        token: GestureToken,
        remaining: u8,
        at: DateTime<Utc>,
    },
    /// The default secondary-view transition was suppressed.
    Redirected {
        token: GestureToken,
        at: DateTime<Utc>,
    },
    /// Home was actually launched for a gesture.
    HomeLaunched {
        token: GestureToken,
        destination: String,
        at: DateTime<Utc>,
    },
    /// The arm state was dropped.
    Cleared {
        reason: String,
        at: DateTime<Utc>,
    },
    /// The gesture's authoritative end state confirmed home; remaining
    /// budget was bounded.
    Settled {
        token: GestureToken,
        bounded_budget: u8,
        at: DateTime<Utc>,
    },
}
