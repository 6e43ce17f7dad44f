/*!
 * Nova Kernel Library
 * In-process microkernel: cooperative scheduling, pub/sub events,
 * in-memory VFS, password-based crypto, and a command dispatcher
 */

pub mod core;
pub mod crypto;
pub mod dispatch;
pub mod events;
pub mod kernel;
pub mod process;
pub mod services;
pub mod vfs;

// Re-exports
pub use crate::core::{init_tracing, KernelError, Pid, SubscriptionId};
pub use crypto::{CryptoError, CryptoService, EncryptedPayload, Key};
pub use dispatch::{register_builtin_commands, Command, CommandDispatcher, CommandError};
pub use events::{
    spawn_command_bridge, EventBus, EventError, KERNEL_COMMAND_EVENT, KERNEL_RESPONSE_EVENT,
};
pub use kernel::{Kernel, KernelConfig};
pub use process::{
    Process, ProcessError, ProcessStatus, ProcessTable, ProcessTask, Scheduler, SchedulerStats,
};
pub use services::{Service, ServiceError, ServiceRegistry};
pub use vfs::{MemFs, VfsError};
