/*!
 * Process Types
 * Common types for process management and scheduling
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use thiserror::Error;

/// Default scheduler tick period
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessError {
    #[error("Process {0} not found")]
    NotFound(Pid),
}

/// Process status
///
/// Transitions are monotone: `Running -> Stopped` or `Running -> Error`.
/// Nothing leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Process is schedulable and its task body runs on ticks
    Running,
    /// Process was stopped explicitly (terminal)
    Stopped,
    /// Process task body faulted (terminal)
    Error,
}

impl ProcessStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessStatus::Stopped | ProcessStatus::Error)
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessStatus::Running => write!(f, "running"),
            ProcessStatus::Stopped => write!(f, "stopped"),
            ProcessStatus::Error => write!(f, "error"),
        }
    }
}

/// Process record
///
/// Owned exclusively by the process table. Records are never destroyed;
/// terminal processes stay queryable but leave the schedulable set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    pub status: ProcessStatus,
    pub started_at: SystemTime,
    pub memory_allocated: u64,
}

impl Process {
    pub fn new(pid: Pid, name: String) -> Self {
        Self {
            pid,
            name,
            status: ProcessStatus::Running,
            started_at: SystemTime::now(),
            memory_allocated: 0,
        }
    }
}

/// Cooperative task body executed by the scheduler tick
///
/// Expected to return quickly or represent one pending asynchronous step;
/// an `Err` (or a panic) is a fault and moves the process to `Error`.
pub type ProcessTask = Box<dyn FnMut() -> anyhow::Result<()> + Send + Sync + 'static>;

/// Result of one scheduler tick execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Task body ran to completion
    Completed(Pid),
    /// Task body faulted; process transitioned to `Error`
    Faulted(Pid),
}

/// Scheduler statistics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub ticks: u64,
    pub executed: u64,
    pub faults: u64,
    pub tick_millis: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(!ProcessStatus::Running.is_terminal());
        assert!(ProcessStatus::Stopped.is_terminal());
        assert!(ProcessStatus::Error.is_terminal());
    }

    #[test]
    fn test_process_serialization() {
        let process = Process::new(1, "logger".to_string());
        let json = serde_json::to_string(&process).unwrap();
        let deserialized: Process = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.pid, 1);
        assert_eq!(deserialized.status, ProcessStatus::Running);
    }
}
