/*!
 * Core Types
 * Common types used across the kernel
 */

use uuid::Uuid;

/// Process ID type
///
/// Allocated monotonically; values are never reused, even after the
/// owning process reaches a terminal state.
pub type Pid = u64;

/// Opaque event-subscription token
pub type SubscriptionId = Uuid;
