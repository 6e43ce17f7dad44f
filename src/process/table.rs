/*!
 * Process Table
 * Owns process records, pid allocation, and the cooperative run queue
 */

use super::types::{Process, ProcessError, ProcessResult, ProcessStatus, ProcessTask, TickOutcome};
use crate::core::types::Pid;
use ahash::RandomState;
use dashmap::DashMap;
use log::{debug, error, info};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process table with cooperative run queue
///
/// Pids are allocated atomically and never reused. Records persist after
/// termination; only the task body and the queue entry go away.
pub struct ProcessTable {
    processes: Arc<DashMap<Pid, Process, RandomState>>,
    tasks: Arc<DashMap<Pid, ProcessTask, RandomState>>,
    run_queue: Arc<Mutex<VecDeque<Pid>>>,
    next_pid: Arc<AtomicU64>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            processes: Arc::new(DashMap::with_hasher(RandomState::new())),
            tasks: Arc::new(DashMap::with_hasher(RandomState::new())),
            run_queue: Arc::new(Mutex::new(VecDeque::new())),
            next_pid: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Start a new process
    ///
    /// Allocates the next pid, inserts a `Running` record, and enqueues the
    /// task body for later ticks. The body never runs synchronously here.
    pub fn spawn(&self, name: impl Into<String>, task: ProcessTask) -> Process {
        let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);
        let process = Process::new(pid, name.into());

        self.processes.insert(pid, process.clone());
        self.tasks.insert(pid, task);
        self.run_queue.lock().push_back(pid);

        info!("Started process '{}' with PID {}", process.name, pid);
        process
    }

    /// Stop a process
    ///
    /// Idempotent: `true` if the pid was schedulable, `false` if unknown or
    /// already terminal. Cancels only future scheduling; a tick already in
    /// flight runs to completion.
    pub fn stop(&self, pid: Pid) -> bool {
        let stopped = match self.processes.get_mut(&pid) {
            Some(mut entry) => {
                if entry.status != ProcessStatus::Running {
                    return false;
                }
                entry.status = ProcessStatus::Stopped;
                true
            }
            None => false,
        };

        if stopped {
            self.tasks.remove(&pid);
            info!("Stopped process with PID {}", pid);
        }
        stopped
    }

    /// Snapshot of all processes, ordered by creation (pid ascending)
    pub fn list(&self) -> Vec<Process> {
        let mut processes: Vec<Process> =
            self.processes.iter().map(|r| r.value().clone()).collect();
        processes.sort_by_key(|p| p.pid);
        processes
    }

    pub fn get(&self, pid: Pid) -> Option<Process> {
        self.processes.get(&pid).map(|r| r.value().clone())
    }

    /// Set the memory allocation for a process
    pub fn allocate_memory(&self, pid: Pid, size: u64) -> ProcessResult<()> {
        let mut entry = self
            .processes
            .get_mut(&pid)
            .ok_or(ProcessError::NotFound(pid))?;
        entry.memory_allocated = size;
        debug!("Allocated {} bytes for PID {}", size, pid);
        Ok(())
    }

    /// Clear the memory allocation for a process
    pub fn free_memory(&self, pid: Pid) -> ProcessResult<()> {
        let mut entry = self
            .processes
            .get_mut(&pid)
            .ok_or(ProcessError::NotFound(pid))?;
        entry.memory_allocated = 0;
        debug!("Freed memory for PID {}", pid);
        Ok(())
    }

    /// Number of schedulable entries currently queued
    pub fn queued(&self) -> usize {
        self.run_queue.lock().len()
    }

    /// Execute one runnable task body (one scheduler tick)
    ///
    /// Pops the next runnable pid, runs its body, and re-enqueues it only if
    /// still `Running` afterwards. A fault (error return or panic) moves the
    /// process to `Error` without touching any other process; the caller's
    /// loop is never interrupted. There is no per-task time budget: a body
    /// that never returns stalls only its own slot.
    pub fn run_next(&self) -> Option<TickOutcome> {
        let (pid, mut task) = loop {
            let candidate = self.run_queue.lock().pop_front()?;
            if !self
                .get(candidate)
                .is_some_and(|p| p.status == ProcessStatus::Running)
            {
                // Stale entry for a terminal process; drop it
                continue;
            }
            // Take the body out of the map so a task that touches the table
            // (spawning or stopping processes) never re-enters its own entry.
            // A concurrent stop() can remove the body between the status
            // check and here; that candidate is gone, try the next one.
            match self.tasks.remove(&candidate) {
                Some((_, task)) => break (candidate, task),
                None => continue,
            }
        };

        let result = catch_unwind(AssertUnwindSafe(|| task()));

        match result {
            Ok(Ok(())) => {
                // Re-enqueue only if still running: stop() during execution
                // cancels future scheduling.
                if self
                    .get(pid)
                    .is_some_and(|p| p.status == ProcessStatus::Running)
                {
                    self.tasks.insert(pid, task);
                    self.run_queue.lock().push_back(pid);
                }
                Some(TickOutcome::Completed(pid))
            }
            Ok(Err(err)) => {
                error!("Task for PID {} failed: {:#}", pid, err);
                self.mark_error(pid);
                Some(TickOutcome::Faulted(pid))
            }
            Err(_) => {
                error!("Task for PID {} panicked", pid);
                self.mark_error(pid);
                Some(TickOutcome::Faulted(pid))
            }
        }
    }

    /// Move a process to `Error`, unless it already reached a terminal state
    fn mark_error(&self, pid: Pid) {
        if let Some(mut entry) = self.processes.get_mut(&pid) {
            if entry.status == ProcessStatus::Running {
                entry.status = ProcessStatus::Error;
            }
        }
    }
}

impl Clone for ProcessTable {
    fn clone(&self) -> Self {
        Self {
            processes: Arc::clone(&self.processes),
            tasks: Arc::clone(&self.tasks),
            run_queue: Arc::clone(&self.run_queue),
            next_pid: Arc::clone(&self.next_pid),
        }
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_task() -> ProcessTask {
        Box::new(|| Ok(()))
    }

    #[test]
    fn test_spawn_assigns_increasing_pids() {
        let table = ProcessTable::new();
        let first = table.spawn("a", noop_task());
        let second = table.spawn("b", noop_task());
        assert!(second.pid > first.pid);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let table = ProcessTable::new();
        let process = table.spawn("a", noop_task());
        assert!(table.stop(process.pid));
        assert!(!table.stop(process.pid));
        assert!(!table.stop(9999));
    }

    #[test]
    fn test_faulting_task_marks_error() {
        let table = ProcessTable::new();
        let process = table.spawn("bad", Box::new(|| anyhow::bail!("boom")));
        let outcome = table.run_next();
        assert_eq!(outcome, Some(TickOutcome::Faulted(process.pid)));
        assert_eq!(
            table.get(process.pid).unwrap().status,
            ProcessStatus::Error
        );
        // Errored process left the schedulable set
        assert!(table.run_next().is_none());
    }

    #[test]
    fn test_panicking_task_marks_error() {
        let table = ProcessTable::new();
        let process = table.spawn("panicky", Box::new(|| panic!("boom")));
        let outcome = table.run_next();
        assert_eq!(outcome, Some(TickOutcome::Faulted(process.pid)));
        assert_eq!(
            table.get(process.pid).unwrap().status,
            ProcessStatus::Error
        );
    }

    #[test]
    fn test_completed_task_is_re_enqueued() {
        let table = ProcessTable::new();
        let process = table.spawn("looper", noop_task());
        assert_eq!(table.run_next(), Some(TickOutcome::Completed(process.pid)));
        assert_eq!(table.run_next(), Some(TickOutcome::Completed(process.pid)));
    }

    #[test]
    fn test_missing_task_body_falls_through_to_next_candidate() {
        let table = ProcessTable::new();
        let racing = table.spawn("racing", noop_task());
        let runnable = table.spawn("next", noop_task());

        // A stop() landing mid-tick removes the body while the record still
        // reads Running; the tick must move on to the next candidate.
        table.tasks.remove(&racing.pid);

        assert_eq!(
            table.run_next(),
            Some(TickOutcome::Completed(runnable.pid))
        );
    }

    #[test]
    fn test_memory_ops_require_known_pid() {
        let table = ProcessTable::new();
        let process = table.spawn("app", noop_task());

        table.allocate_memory(process.pid, 4096).unwrap();
        assert_eq!(table.get(process.pid).unwrap().memory_allocated, 4096);

        table.free_memory(process.pid).unwrap();
        assert_eq!(table.get(process.pid).unwrap().memory_allocated, 0);

        assert_eq!(
            table.allocate_memory(777, 1),
            Err(ProcessError::NotFound(777))
        );
        assert_eq!(table.free_memory(777), Err(ProcessError::NotFound(777)));
    }
}
