//! Gesture identity tracking.
//!
//! A token distinguishes one continuous gesture from the next. The platform
//! adapter derives it from the identity of the in-flight gesture's state
//! object (falling back to the handler instance); the core only cares that a
//! token is stable per gesture and distinct across gestures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity for one continuous gesture.
///
/// `GestureToken::NONE` means "no derivable identity"; persistent decisions
/// must never be keyed on it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GestureToken(u64);

impl GestureToken {
    pub const NONE: GestureToken = GestureToken(0);

    pub const fn new(value: u64) -> Self {
        GestureToken(value)
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GestureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks the last-seen gesture token and detects gesture boundaries.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    last_seen: GestureToken,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `candidate` as the current gesture.
    ///
    /// Returns `true` when a new gesture began, i.e. the candidate differs
    /// from the previously seen token. Repeat calls with the same token are
    /// idempotent. An empty candidate is never recorded and never signals a
    /// new gesture.
    pub fn observe(&mut self, candidate: GestureToken) -> bool {
        if candidate.is_none() || candidate == self.last_seen {
            return false;
        }
        self.last_seen = candidate;
        true
    }

    pub fn last_seen(&self) -> GestureToken {
        self.last_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_is_a_new_gesture() {
        let mut registry = TokenRegistry::new();
        assert!(registry.observe(GestureToken::new(42)));
        assert_eq!(registry.last_seen(), GestureToken::new(42));
    }

    #[test]
    fn repeat_observation_is_idempotent() {
        let mut registry = TokenRegistry::new();
        assert!(registry.observe(GestureToken::new(42)));
        assert!(!registry.observe(GestureToken::new(42)));
        assert!(!registry.observe(GestureToken::new(42)));
        assert_eq!(registry.last_seen(), GestureToken::new(42));
    }

    #[test]
    fn different_token_signals_new_gesture() {
        let mut registry = TokenRegistry::new();
        registry.observe(GestureToken::new(42));
        assert!(registry.observe(GestureToken::new(99)));
        assert_eq!(registry.last_seen(), GestureToken::new(99));
    }

    #[test]
    fn empty_token_is_never_recorded() {
        let mut registry = TokenRegistry::new();
        assert!(!registry.observe(GestureToken::NONE));
        assert_eq!(registry.last_seen(), GestureToken::NONE);

        registry.observe(GestureToken::new(42));
        assert!(!registry.observe(GestureToken::NONE));
        assert_eq!(registry.last_seen(), GestureToken::new(42));
    }
}
