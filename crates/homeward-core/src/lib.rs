//! # Homeward Core Library
//!
//! Homeward observes the navigation-intent signals a host fires while a user
//! performs a continuous swipe gesture, predicts whether the gesture will
//! settle on the home screen before its animation completes, and — when the
//! active home destination is not the default system handler — authorizes a
//! bounded bypass of the intermediate task-switcher transition so the
//! alternate home activates immediately.
//!
//! ## Architecture
//!
//! - [`RedirectEngine`]: the single lock-guarded decision authority; all
//!   observation points funnel into it, each transition one atomic step
//! - [`ArmState`]: budget-bounded bypass authorization — no time windows,
//!   so the mechanism is robust to variable call latency
//! - [`classify`]: dual-flag outcome prediction aggregation
//! - Collaborator traits ([`HomeResolver`], [`HomeLauncher`],
//!   [`SecondaryViewService`], [`GestureHandle`]): explicit seams to the
//!   platform layer; the core never performs name-based lookup itself
//! - [`Trace`]/[`replay`]: recorded signal sequences for deterministic
//!   replay by the CLI and tests

pub mod arming;
pub mod collab;
pub mod engine;
pub mod error;
pub mod events;
pub mod outcome;
pub mod predictor;
pub mod token;
pub mod trace;

pub use arming::{ArmState, INITIAL_BYPASS_BUDGET};
pub use collab::{
    Destination, GestureHandle, HomeLauncher, HomeResolver, LaunchStatus, Resolution,
    SecondaryViewService,
};
pub use engine::{RedirectDecision, RedirectEngine};
pub use error::{CoreError, TraceError};
pub use events::Event;
pub use outcome::OutcomeClass;
pub use predictor::{classify, is_home_swipe, EndTargetPredictor, GestureVector, Prediction};
pub use token::{GestureToken, TokenRegistry};
pub use trace::{replay, ReplayReport, ScriptedPlatform, Signal, Trace, TraceEnvironment};
