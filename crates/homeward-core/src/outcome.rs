//! Gesture outcome classification.

use serde::{Deserialize, Serialize};

/// The destination a gesture is predicted (or confirmed) to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeClass {
    /// Gesture settles on the home screen.
    Home,
    /// Gesture settles on the task switcher.
    Recents,
    /// A recognized end target that is neither home nor recents
    /// (back to the app, quick-switch to another task, ...).
    Other,
    /// The predictor failed or reported something unrecognized.
    /// Must never be treated as `Home`.
    Unknown,
}

impl OutcomeClass {
    /// Parse a raw end-target value reported at the platform boundary.
    ///
    /// Core logic matches on the closed enum; this is the only place a
    /// platform string is interpreted.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "HOME" => OutcomeClass::Home,
            "RECENTS" => OutcomeClass::Recents,
            "LAST_TASK" | "NEW_TASK" | "ALL_APPS" => OutcomeClass::Other,
            _ => OutcomeClass::Unknown,
        }
    }

    pub fn is_home(self) -> bool {
        self == OutcomeClass::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_end_targets() {
        assert_eq!(OutcomeClass::from_raw("HOME"), OutcomeClass::Home);
        assert_eq!(OutcomeClass::from_raw("RECENTS"), OutcomeClass::Recents);
        assert_eq!(OutcomeClass::from_raw("LAST_TASK"), OutcomeClass::Other);
        assert_eq!(OutcomeClass::from_raw("NEW_TASK"), OutcomeClass::Other);
    }

    #[test]
    fn unrecognized_values_are_unknown_not_home() {
        assert_eq!(OutcomeClass::from_raw(""), OutcomeClass::Unknown);
        assert_eq!(OutcomeClass::from_raw("home"), OutcomeClass::Unknown);
        assert_eq!(OutcomeClass::from_raw("garbage"), OutcomeClass::Unknown);
        assert!(!OutcomeClass::from_raw("garbage").is_home());
    }
}
