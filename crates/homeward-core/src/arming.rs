//! Bypass arming state machine.
//!
//! An arm is a budget-bounded authorization to bypass the default
//! secondary-view transition for one specific gesture. The budget replaces
//! any fixed time window: call latency varies per call site and device, so
//! exposure to a stale arm is bounded by use count, not by wall clock.

use serde::{Deserialize, Serialize};

use crate::token::GestureToken;

/// How many downstream call sites may consume a fresh authorization before
/// it must be re-earned by a new prediction.
pub const INITIAL_BYPASS_BUDGET: u8 = 2;

/// Authorization state for the direct-home bypass.
///
/// `Armed` is the only variant carrying a token and budget, so the
/// invariants (armed ⇔ budget > 0 ⇔ token set) hold by construction:
/// every transition that would zero the budget produces `Unarmed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ArmState {
    #[default]
    Unarmed,
    Armed { token: GestureToken, budget: u8 },
}

impl ArmState {
    /// Grant a fresh authorization for `token` with the given budget.
    ///
    /// Arming with an empty token or a zero budget is a defensive no-op that
    /// leaves the machine `Unarmed`: an un-derivable token can never satisfy
    /// [`is_armed_for`](Self::is_armed_for), so such an arm would only leak.
    pub fn arm(&mut self, token: GestureToken, budget: u8) -> bool {
        if token.is_none() || budget == 0 {
            *self = ArmState::Unarmed;
            return false;
        }
        *self = ArmState::Armed { token, budget };
        true
    }

    /// Spend one unit of budget. At zero the authorization self-expires.
    ///
    /// Returns `true` when a unit was actually consumed. Never decrements
    /// below zero.
    pub fn consume(&mut self) -> bool {
        match *self {
            ArmState::Armed { token, budget } if budget > 1 => {
                *self = ArmState::Armed {
                    token,
                    budget: budget - 1,
                };
                true
            }
            ArmState::Armed { .. } => {
                *self = ArmState::Unarmed;
                true
            }
            ArmState::Unarmed => false,
        }
    }

    /// Cap the remaining budget at `max` without ever granting more.
    /// `bound(0)` disarms.
    pub fn bound(&mut self, max: u8) {
        if let ArmState::Armed { token, budget } = *self {
            if max == 0 {
                *self = ArmState::Unarmed;
            } else if budget > max {
                *self = ArmState::Armed { token, budget: max };
            }
        }
    }

    /// Unconditionally drop any authorization.
    pub fn clear(&mut self) {
        *self = ArmState::Unarmed;
    }

    /// True only when armed for this exact, non-empty token with budget left.
    /// A stale arm can never leak into an unrelated gesture.
    pub fn is_armed_for(&self, token: GestureToken) -> bool {
        match *self {
            ArmState::Armed {
                token: armed,
                budget,
            } => !token.is_none() && armed == token && budget > 0,
            ArmState::Unarmed => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, ArmState::Armed { .. })
    }

    pub fn budget(&self) -> u8 {
        match *self {
            ArmState::Armed { budget, .. } => budget,
            ArmState::Unarmed => 0,
        }
    }

    pub fn token(&self) -> GestureToken {
        match *self {
            ArmState::Armed { token, .. } => token,
            ArmState::Unarmed => GestureToken::NONE,
        }
    }
}
