//! Events emitted by the wizard to its observers.
//!
//! Every event carries the page it refers to and a snapshot of the
//! submission data at the time it was emitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{domain_event, EventId, Timestamp, WizardId};
use crate::domain::submission::Submission;

/// Advanced to the next page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextPageEvent {
    pub event_id: EventId,
    pub wizard_id: WizardId,
    pub page: usize,
    pub submission: Value,
    pub occurred_at: Timestamp,
}

domain_event!(
    NextPageEvent,
    event_type = "nextPage",
    schema_version = 1,
    aggregate_id = wizard_id,
    aggregate_type = "Wizard",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Went back to the previous page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrevPageEvent {
    pub event_id: EventId,
    pub wizard_id: WizardId,
    pub page: usize,
    pub submission: Value,
    pub occurred_at: Timestamp,
}

domain_event!(
    PrevPageEvent,
    event_type = "prevPage",
    schema_version = 1,
    aggregate_id = wizard_id,
    aggregate_type = "Wizard",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A breadcrumb link was clicked. Emitted before the page changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationClickedEvent {
    pub event_id: EventId,
    pub wizard_id: WizardId,
    /// Page the user asked for.
    pub page: usize,
    pub panel_key: String,
    pub submission: Value,
    pub occurred_at: Timestamp,
}

domain_event!(
    NavigationClickedEvent,
    event_type = "wizardNavigationClicked",
    schema_version = 1,
    aggregate_id = wizard_id,
    aggregate_type = "Wizard",
    occurred_at = occurred_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedEvent {
    pub event_id: EventId,
    pub wizard_id: WizardId,
    pub page: usize,
    pub submission: Value,
    pub occurred_at: Timestamp,
}

domain_event!(
    RenderedEvent,
    event_type = "render",
    schema_version = 1,
    aggregate_id = wizard_id,
    aggregate_type = "Wizard",
    occurred_at = occurred_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachedEvent {
    pub event_id: EventId,
    pub wizard_id: WizardId,
    pub page: usize,
    pub submission: Value,
    pub occurred_at: Timestamp,
}

domain_event!(
    AttachedEvent,
    event_type = "attach",
    schema_version = 1,
    aggregate_id = wizard_id,
    aggregate_type = "Wizard",
    occurred_at = occurred_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedEvent {
    pub event_id: EventId,
    pub wizard_id: WizardId,
    pub page: usize,
    pub submission: Value,
    pub occurred_at: Timestamp,
}

domain_event!(
    SubmittedEvent,
    event_type = "submit",
    schema_version = 1,
    aggregate_id = wizard_id,
    aggregate_type = "Wizard",
    occurred_at = occurred_at,
    event_id = event_id
);

/// The user confirmed cancelling; the wizard is back on page 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelledEvent {
    pub event_id: EventId,
    pub wizard_id: WizardId,
    pub page: usize,
    pub submission: Value,
    pub occurred_at: Timestamp,
}

domain_event!(
    CancelledEvent,
    event_type = "cancel",
    schema_version = 1,
    aggregate_id = wizard_id,
    aggregate_type = "Wizard",
    occurred_at = occurred_at,
    event_id = event_id
);

macro_rules! page_event_constructor {
    ($($event:ident),+ $(,)?) => {
        $(
            impl $event {
                pub fn new(wizard_id: WizardId, page: usize, submission: &Submission) -> Self {
                    Self {
                        event_id: EventId::new(),
                        wizard_id,
                        page,
                        submission: submission.data_value(),
                        occurred_at: Timestamp::now(),
                    }
                }
            }
        )+
    };
}

page_event_constructor!(
    NextPageEvent,
    PrevPageEvent,
    RenderedEvent,
    AttachedEvent,
    SubmittedEvent,
    CancelledEvent,
);

impl NavigationClickedEvent {
    pub fn new(
        wizard_id: WizardId,
        page: usize,
        panel_key: impl Into<String>,
        submission: &Submission,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            wizard_id,
            page,
            panel_key: panel_key.into(),
            submission: submission.data_value(),
            occurred_at: Timestamp::now(),
        }
    }
}
