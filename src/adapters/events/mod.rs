//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus with an event log

mod in_memory;

pub use in_memory::InMemoryEventBus;
