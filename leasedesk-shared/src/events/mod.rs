/// Tenant change notifications
///
/// Screens never call each other. A screen that changes the tenant
/// collection publishes a [`TenantEvent`] on the shared [`TenantEvents`] bus,
/// and screens that display tenants subscribe and refresh themselves.
///
/// # Example
///
/// ```
/// use leasedesk_shared::events::{TenantEvent, TenantEvents};
///
/// let events = TenantEvents::default();
/// let mut rx = events.subscribe();
///
/// events.publish(TenantEvent::Created { name: "Jane Doe".to_string() });
/// assert!(matches!(rx.try_recv(), Ok(TenantEvent::Created { .. })));
/// ```

use crate::models::tenant::TenantId;
use tokio::sync::broadcast;

/// Default number of undelivered events kept per subscriber
pub const DEFAULT_CAPACITY: usize = 32;

/// Something happened to the tenant collection
#[derive(Debug, Clone, PartialEq)]
pub enum TenantEvent {
    /// A tenant was created on the backend
    Created {
        /// Name of the new tenant
        name: String,
    },

    /// A tenant was deleted from the backend
    Deleted {
        /// Id of the removed tenant
        id: TenantId,
    },
}

impl TenantEvent {
    /// Returns the event kind as a string (for logs)
    pub fn kind(&self) -> &'static str {
        match self {
            TenantEvent::Created { .. } => "created",
            TenantEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Broadcast bus for tenant events
///
/// Cloning the bus yields another handle to the same channel.
#[derive(Debug, Clone)]
pub struct TenantEvents {
    tx: broadcast::Sender<TenantEvent>,
}

impl TenantEvents {
    /// Creates a bus that buffers up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        TenantEvents { tx }
    }

    /// Publishes an event to every current subscriber
    ///
    /// Publishing with no subscribers is not an error; the event is dropped.
    pub fn publish(&self, event: TenantEvent) {
        let kind = event.kind();
        match self.tx.send(event) {
            Ok(receivers) => tracing::debug!(kind, receivers, "tenant event published"),
            Err(_) => tracing::debug!(kind, "tenant event dropped, no subscribers"),
        }
    }

    /// Subscribes to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TenantEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for TenantEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
