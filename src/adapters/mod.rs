//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the wizard engine to its collaborators:
//! - `events` - In-memory event bus
//! - `render` - HTML template renderer
//! - `dom` - In-memory element binder
//! - `loader` - Static and file-based form loaders
//! - `hooks` - Accept-all and scripted navigation hooks

pub mod dom;
pub mod events;
pub mod hooks;
pub mod loader;
pub mod render;

pub use dom::{Listener, RecordingBinder};
pub use events::InMemoryEventBus;
pub use hooks::{AcceptAllHooks, HookCall, HookPoint, ScriptedHooks};
pub use loader::{FileFormLoader, StaticFormLoader};
pub use render::HtmlTemplateRenderer;
