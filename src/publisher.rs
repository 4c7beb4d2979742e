//! Fire-and-forget publishing of domain events to NATS

use tracing::{debug, warn};

use crate::domain::events::DomainEvent;

#[derive(Clone, Default)]
pub struct EventPublisher {
    nats: Option<async_nats::Client>,
}

impl EventPublisher {
    pub fn new(nats: Option<async_nats::Client>) -> Self { Self { nats } }

    /// Connects to `url` when given. A broker that cannot be reached disables
    /// publishing instead of stopping the service.
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else { return Self::default() };
        match async_nats::connect(url).await {
            Ok(client) => {
                tracing::info!("Publishing domain events to {url}");
                Self::new(Some(client))
            }
            Err(e) => {
                warn!("NATS unavailable at {url}, events disabled: {e}");
                Self::default()
            }
        }
    }

    pub fn is_enabled(&self) -> bool { self.nats.is_some() }

    pub async fn publish(&self, event: DomainEvent) {
        debug!(event = event.name(), "domain event");
        let Some(nats) = &self.nats else { return };
        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to encode {}: {e}", event.name());
                return;
            }
        };
        if let Err(e) = nats.publish(event.subject(), payload.into()).await {
            warn!("Failed to publish {}: {e}", event.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_publisher_is_noop() {
        let publisher = EventPublisher::connect(None).await;
        assert!(!publisher.is_enabled());
        publisher.publish(DomainEvent::ProductRestocked { model: "m".into(), quantity: 1 }).await;
    }
}
