/*!
 * Events Module
 * Asynchronous publish/subscribe bus behind a typed message protocol
 */

pub mod bridge;
pub mod bus;
pub mod types;

// Re-exports
pub use bridge::{spawn_command_bridge, KERNEL_COMMAND_EVENT, KERNEL_RESPONSE_EVENT};
pub use bus::EventBus;
pub use types::{BusRequest, EventData, EventError, EventResult, Listener};
