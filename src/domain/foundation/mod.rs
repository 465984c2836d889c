//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, lifecycle status, events, and error types that
//! form the vocabulary of the wizard engine.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;
mod wizard_status;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{ComponentId, WizardId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use wizard_status::WizardStatus;
