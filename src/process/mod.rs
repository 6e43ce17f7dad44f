/*!
 * Process Module
 * Process table and cooperative scheduling
 */

pub mod scheduler;
pub mod table;
pub mod types;

// Re-exports
pub use scheduler::{Scheduler, SchedulerCommand};
pub use table::ProcessTable;
pub use types::{
    Process, ProcessError, ProcessResult, ProcessStatus, ProcessTask, SchedulerStats, TickOutcome,
    DEFAULT_TICK,
};
