//! WizardStatus enum for tracking the lifecycle of a wizard instance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a wizard.
///
/// Navigation is only accepted once the form schema has been set and the
/// component tree built, i.e. outside of `Initializing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    #[default]
    Initializing,
    Ready,
    Submitting,
    Submitted,
}

impl WizardStatus {
    /// Returns true if navigation operations may run.
    pub fn accepts_navigation(&self) -> bool {
        matches!(self, WizardStatus::Ready | WizardStatus::Submitted)
    }

    /// Returns true while a submit is validating every page.
    pub fn is_submitting(&self) -> bool {
        matches!(self, WizardStatus::Submitting)
    }
}

impl StateMachine for WizardStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WizardStatus::*;
        matches!(
            (self, target),
            (Initializing, Ready)
                | (Ready, Ready)
                | (Ready, Submitting)
                | (Submitting, Ready)
                | (Submitting, Submitted)
                | (Submitted, Ready)
                | (Submitted, Submitting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WizardStatus::*;
        match self {
            Initializing => vec![Ready],
            Ready => vec![Ready, Submitting],
            Submitting => vec![Ready, Submitted],
            Submitted => vec![Ready, Submitting],
        }
    }
}

impl fmt::Display for WizardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WizardStatus::Initializing => "Initializing",
            WizardStatus::Ready => "Ready",
            WizardStatus::Submitting => "Submitting",
            WizardStatus::Submitted => "Submitted",
        };
        write!(f, "{}", s)
    }
}
