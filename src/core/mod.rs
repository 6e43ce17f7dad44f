/*!
 * Core Module
 * Shared types, unified errors, and tracing setup
 */

pub mod errors;
pub mod logging;
pub mod types;

// Re-exports
pub use errors::{KernelError, Result};
pub use logging::init_tracing;
pub use types::{Pid, SubscriptionId};
