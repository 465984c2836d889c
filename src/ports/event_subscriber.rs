//! EventSubscriber port - Interface for subscribing to domain events.
//!
//! This port defines how observers register interest in wizard events
//! (`nextPage`, `render`, ...) without knowing who emits them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Implementations should be:
/// - **Idempotent** - Safe to call multiple times with same event
/// - **Quick** - They run inline with the wizard operation that emitted the event
/// - **Isolated** - A failing handler does not stop the others
///
/// # Example
///
/// ```ignore
/// struct ProgressTracker { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for ProgressTracker {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: NextPageEvent = event.payload_as()?;
///         // Record how far the user got...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "ProgressTracker"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    ///
    /// This method should be idempotent - calling it multiple times
    /// with the same event should produce the same result.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging and metrics.
    ///
    /// Used for:
    /// - Error messages (e.g., "ProgressTracker: failed to record page")
    /// - Log fields when a handler fails
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// Handlers register interest in specific event types and are invoked
/// when matching events are published.
///
/// # Example
///
/// ```ignore
/// subscriber.subscribe("nextPage", progress_tracker);
/// subscriber.subscribe_all(&["render", "attach"], surface_watcher);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    ///
    /// The handler will be invoked for every event matching the given type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    ///
    /// The same handler instance is invoked for any matching event type.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined trait for event bus implementations.
///
/// An EventBus provides both publishing and subscribing capabilities.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

// Blanket implementation - any type that implements both traits is an EventBus
impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
