//! Collaborator seams toward the platform layer.
//!
//! Everything the core cannot do itself — resolving the current default home
//! destination, launching an activity, acknowledging the secondary-view
//! service, reaching into the in-flight gesture state — comes through these
//! traits. Reflective or name-based lookup stays entirely on the adapter
//! side; the core switches on explicit results instead of suppressing
//! exceptions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeClass;
use crate::token::GestureToken;

/// A resolved home activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub package: String,
    pub component: String,
}

impl Destination {
    pub fn new(package: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            component: component.into(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.component)
    }
}

/// Outcome of a collaborator query: a value, a definitive "there is none",
/// or the collaborator itself could not be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Absent,
    Unavailable,
}

impl<T> Resolution<T> {
    pub fn resolved(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Absent | Resolution::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatus {
    Launched,
    Failed,
}

/// Resolves the current default home destination (a platform
/// package-resolution query).
pub trait HomeResolver {
    fn resolve_default_home(&self) -> Resolution<Destination>;
}

/// Launches an activity (a platform intent-dispatch call).
pub trait HomeLauncher {
    fn launch(&self, destination: &Destination) -> LaunchStatus;
}

/// Backing service of the default secondary view (the task switcher).
pub trait SecondaryViewService {
    /// Lightweight "transition already finished" acknowledgment. A no-op
    /// notification, not a state change the core depends on.
    fn acknowledge_finished(&self);
}

/// Adapter capability over the in-flight gesture's state.
pub trait GestureHandle {
    /// Identity of this gesture; `GestureToken::NONE` when none is
    /// derivable. Adapters fall back to the handler instance identity
    /// before giving up.
    fn token(&self) -> GestureToken;

    /// Push the predicted end target back into the gesture state.
    /// Best-effort; the adapter absorbs failures.
    fn set_end_target(&self, outcome: OutcomeClass);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_display_is_short_component_form() {
        let dest = Destination::new("org.acme.launcher", ".Home");
        assert_eq!(dest.to_string(), "org.acme.launcher/.Home");
    }

    #[test]
    fn resolution_resolved_extracts_only_values() {
        assert_eq!(
            Resolution::Resolved(1u32).resolved(),
            Some(1)
        );
        assert_eq!(Resolution::<u32>::Absent.resolved(), None);
        assert_eq!(Resolution::<u32>::Unavailable.resolved(), None);
    }
}
