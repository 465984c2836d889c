//! Application layer - the wizard controller.
//!
//! This layer orchestrates the domain engine and coordinates between ports:
//! hooks before a transition, the engine for the commit, renderer and binder
//! for the redraw, and the publisher for the event.

mod error;
mod wizard_controller;

pub use error::WizardError;
pub use wizard_controller::{WizardController, WizardDeps};
