/*!
 * Dispatch Module
 * Textual command protocol routed onto kernel operations
 */

pub mod builtins;
pub mod dispatcher;
pub mod types;

// Re-exports
pub use builtins::register_builtin_commands;
pub use dispatcher::{Command, CommandDispatcher, WeakDispatcher};
pub use types::{CommandError, CommandResult};
