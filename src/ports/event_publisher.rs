//! EventPublisher port - Interface for publishing wizard events.
//!
//! This port defines how the wizard announces navigation and lifecycle
//! events without knowing who observes them (embedding page, analytics,
//! test recorder).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing wizard events.
///
/// Implementations must ensure:
/// - Events are delivered in the order they were published
/// - Errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// let event = NextPageEvent::new(wizard_id, 1, &submission).to_envelope();
/// publisher.publish(event).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// Adapters without batch support publish sequentially and stop at the
    /// first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct Collecting(Mutex<Vec<String>>);

    #[async_trait]
    impl EventPublisher for Collecting {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            self.0.lock().unwrap().push(event.event_type);
            Ok(())
        }

        async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
            for event in events {
                self.publish(event).await?;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn publisher_is_usable_as_trait_object() {
        let publisher: Box<dyn EventPublisher> = Box::new(Collecting(Mutex::new(Vec::new())));
        publisher
            .publish_all(vec![
                EventEnvelope::new("render", "w-1", "Wizard", json!({})),
                EventEnvelope::new("attach", "w-1", "Wizard", json!({})),
            ])
            .await
            .unwrap();
    }
}
