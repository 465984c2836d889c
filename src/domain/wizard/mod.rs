//! Wizard module - the page-flow engine.
//!
//! `WizardState` holds everything that changes during navigation. The
//! engine components below are stateless and operate on it by reference:
//!
//! - `PageModel` - page handles, last-page detection, key lookup
//! - `NavigationEngine` - next/previous page, transition planning, commits, rebuilds
//! - `ValidityAggregator` - per-page and cross-page validation
//! - `ButtonVisibility` - footer button policy

mod buttons;
mod events;
mod field_logic;
mod navigation;
mod pages;
mod state;
mod validity;

pub use buttons::{
    is_clickable, page_id, BreadcrumbSettings, ButtonSettings, ButtonVisibility, WizardAction,
    WizardButton,
};
pub use events::{
    AttachedEvent, CancelledEvent, NavigationClickedEvent, NextPageEvent, PrevPageEvent,
    RenderedEvent, SubmittedEvent,
};
pub use field_logic::apply_field_logic;
pub use navigation::{NavigationEngine, NavigationError, PageTransition};
pub use pages::{PageHandle, PageModel};
pub use state::WizardState;
pub use validity::ValidityAggregator;
