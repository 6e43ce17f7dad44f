/*!
 * Event Bus Actor
 * Isolated listener tables driven by the typed message channel
 *
 * Delivery is asynchronous: publish returns before any listener runs, so a
 * listener can never re-enter its publisher synchronously. A faulting
 * listener is caught individually and delivery continues.
 */

use super::types::{BusRequest, EventData, EventError, EventResult, Listener};
use crate::core::types::SubscriptionId;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

struct Subscriber {
    id: SubscriptionId,
    listener: Listener,
}

/// Handle to the event-bus actor
pub struct EventBus {
    request_tx: mpsc::UnboundedSender<BusRequest>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl EventBus {
    /// Spawn the bus actor
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            run_bus_loop(request_rx).await;
        });

        info!("Event bus actor spawned");

        Self {
            request_tx,
            handle: Some(handle),
        }
    }

    /// Register a listener for an event type
    ///
    /// Registration is a round trip to the actor; the returned token is the
    /// only way to remove the listener again.
    pub async fn subscribe(
        &self,
        event_type: impl Into<String>,
        listener: Listener,
    ) -> EventResult<SubscriptionId> {
        let (reply, reply_rx) = oneshot::channel();
        self.request_tx
            .send(BusRequest::AddListener {
                event_type: event_type.into(),
                listener,
                reply,
            })
            .map_err(|_| EventError::Closed)?;
        reply_rx.await.map_err(|_| EventError::Closed)
    }

    /// Drop a listener by its subscription token
    ///
    /// Best-effort: unknown tokens are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let _ = self.request_tx.send(BusRequest::RemoveListener { id });
    }

    /// Publish an event
    ///
    /// Returns immediately; listeners run later on the actor. No
    /// backpressure signal comes back to the publisher.
    pub fn publish(&self, event_type: impl Into<String>, data: EventData) {
        let _ = self.request_tx.send(BusRequest::Dispatch {
            event_type: event_type.into(),
            data,
        });
    }

    /// Shutdown the bus actor gracefully
    pub async fn shutdown(mut self) {
        let _ = self.request_tx.send(BusRequest::Shutdown);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Event bus shutdown error: {}", e);
            } else {
                info!("Event bus shutdown complete");
            }
        }
    }
}

async fn run_bus_loop(mut request_rx: mpsc::UnboundedReceiver<BusRequest>) {
    // event type -> subscribers in subscription order
    let mut listeners: HashMap<String, Vec<Subscriber>> = HashMap::new();
    // subscription id -> event type, for removal
    let mut index: HashMap<SubscriptionId, String> = HashMap::new();

    while let Some(request) = request_rx.recv().await {
        match request {
            BusRequest::AddListener {
                event_type,
                listener,
                reply,
            } => {
                let id = Uuid::new_v4();
                listeners
                    .entry(event_type.clone())
                    .or_default()
                    .push(Subscriber { id, listener });
                index.insert(id, event_type.clone());
                debug!("Registered listener {} for \"{}\"", id, event_type);
                let _ = reply.send(id);
            }

            BusRequest::RemoveListener { id } => {
                if let Some(event_type) = index.remove(&id) {
                    if let Some(subs) = listeners.get_mut(&event_type) {
                        subs.retain(|s| s.id != id);
                    }
                    debug!("Removed listener {} for \"{}\"", id, event_type);
                }
            }

            BusRequest::Dispatch { event_type, data } => {
                // Zero subscribers is a no-op
                let Some(subs) = listeners.get_mut(&event_type) else {
                    continue;
                };
                for sub in subs.iter_mut() {
                    let outcome = catch_unwind(AssertUnwindSafe(|| (sub.listener)(&data)));
                    if outcome.is_err() {
                        // Fault stays with this listener; the rest still
                        // receive the event.
                        error!(
                            "Listener {} for \"{}\" panicked during delivery",
                            sub.id, event_type
                        );
                    }
                }
            }

            BusRequest::Shutdown => {
                info!("Event bus actor shutting down");
                break;
            }
        }
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        // Clones share the actor; only the original handle can join it
        Self {
            request_tx: self.request_tx.clone(),
            handle: None,
        }
    }
}

impl Drop for EventBus {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.request_tx.send(BusRequest::Shutdown);
        }
    }
}
