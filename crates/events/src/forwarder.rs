//! Warehouse forwarding service.
//!
//! [`WarehouseForwarder`] subscribes to the event bus and delivers run
//! events to the configured warehouse URL via [`WebhookDelivery`]. Only
//! run lifecycle events leave the building; everything else stays
//! internal (persisted by [`EventPersistence`](crate::EventPersistence)).

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;
use crate::delivery::webhook::WebhookDelivery;

/// Event type prefixes that are forwarded to the warehouse.
const FORWARDED_PREFIXES: [&str; 2] = ["pacbio.run.", "ont.run."];

/// Background service forwarding run events to the warehouse endpoint.
pub struct WarehouseForwarder {
    url: String,
    delivery: WebhookDelivery,
}

impl WarehouseForwarder {
    pub fn new(url: String) -> Self {
        Self {
            url,
            delivery: WebhookDelivery::new(),
        }
    }

    /// Whether an event type is a run event the warehouse wants.
    fn forwards(event_type: &str) -> bool {
        FORWARDED_PREFIXES
            .iter()
            .any(|prefix| event_type.starts_with(prefix))
    }

    /// Run the forwarding loop until the bus closes.
    ///
    /// Delivery failures are logged and dropped; the warehouse can
    /// re-request state through the API, so a lost notification is not
    /// fatal to the run itself.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if !Self::forwards(&event.event_type) {
                        continue;
                    }
                    if let Err(e) = self.delivery.deliver(&self.url, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to forward event to warehouse"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Warehouse forwarder lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, warehouse forwarder shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_run_events_are_forwarded() {
        assert!(WarehouseForwarder::forwards("pacbio.run.created"));
        assert!(WarehouseForwarder::forwards("ont.run.started"));
        assert!(!WarehouseForwarder::forwards("ont.plate.created"));
        assert!(!WarehouseForwarder::forwards("pacbio.library.created"));
    }
}
