//! Ports - Interfaces for the wizard's collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the wizard engine and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing wizard events
//! - `EventSubscriber` - Port for observing wizard events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Surface Ports
//!
//! - `TemplateRenderer` - Named templates to markup
//! - `ElementBinder` - Content, refs and listeners on the rendered surface
//!
//! ## Flow Ports
//!
//! - `FormLoader` - Source of the form definition
//! - `NavigationHooks` - Embedder callbacks that may veto transitions

mod element_binder;
mod event_publisher;
mod event_subscriber;
mod form_loader;
mod navigation_hooks;
mod template_renderer;

pub use element_binder::{ElementBinder, ElementHandle, RefCardinality, RefSpec, Refs};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use form_loader::FormLoader;
pub use navigation_hooks::NavigationHooks;
pub use template_renderer::{RenderMode, TemplateRenderer};
