/*!
 * Event Types
 * Wire protocol for the event-bus actor
 */

use crate::core::types::SubscriptionId;
use thiserror::Error;
use tokio::sync::oneshot;

/// Event payload carried to listeners
pub type EventData = serde_json::Value;

/// Listener callback invoked on delivery
pub type Listener = Box<dyn FnMut(&EventData) + Send + 'static>;

/// Event bus operation result
pub type EventResult<T> = Result<T, EventError>;

/// Event bus errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event bus is closed")]
    Closed,
}

/// Message protocol for the bus actor
///
/// The actor is reachable only through this channel; there is no shared
/// mutable state between publishers and the listener tables.
pub enum BusRequest {
    /// Register a listener; the subscription id comes back on `reply`
    AddListener {
        event_type: String,
        listener: Listener,
        reply: oneshot::Sender<SubscriptionId>,
    },
    /// Drop a listener by its subscription id
    RemoveListener { id: SubscriptionId },
    /// Deliver `data` to every listener of `event_type`, in subscription order
    Dispatch { event_type: String, data: EventData },
    /// Shutdown the actor
    Shutdown,
}

impl std::fmt::Debug for BusRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusRequest::AddListener { event_type, .. } => {
                f.debug_struct("AddListener").field("event_type", event_type).finish()
            }
            BusRequest::RemoveListener { id } => {
                f.debug_struct("RemoveListener").field("id", id).finish()
            }
            BusRequest::Dispatch { event_type, .. } => {
                f.debug_struct("Dispatch").field("event_type", event_type).finish()
            }
            BusRequest::Shutdown => f.write_str("Shutdown"),
        }
    }
}
