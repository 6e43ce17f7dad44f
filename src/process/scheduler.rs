/*!
 * Scheduler Task
 * Autonomous tick loop driving the cooperative process table
 *
 * One runnable task body executes per tick. Faults are absorbed at the
 * tick boundary by the process table, so the loop itself never stops.
 */

use super::table::ProcessTable;
use super::types::{SchedulerStats, TickOutcome, DEFAULT_TICK};
use log::{info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Control messages for the scheduler task
#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    /// Change the tick period
    SetTick(Duration),
    /// Pause automatic ticking
    Pause,
    /// Resume automatic ticking
    Resume,
    /// Run one tick immediately
    Trigger,
    /// Shutdown the scheduler task
    Shutdown,
}

#[derive(Default)]
struct Counters {
    ticks: AtomicU64,
    executed: AtomicU64,
    faults: AtomicU64,
    tick_millis: AtomicU64,
}

/// Handle to the scheduler background task
pub struct Scheduler {
    command_tx: mpsc::UnboundedSender<SchedulerCommand>,
    handle: Option<tokio::task::JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl Scheduler {
    /// Spawn a scheduler task with the default tick period
    pub fn spawn(table: ProcessTable) -> Self {
        Self::spawn_with_tick(table, DEFAULT_TICK)
    }

    /// Spawn a scheduler task with an explicit tick period
    pub fn spawn_with_tick(table: ProcessTable, tick: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        counters
            .tick_millis
            .store(tick.as_millis() as u64, Ordering::Relaxed);

        let loop_counters = Arc::clone(&counters);
        let handle = tokio::spawn(async move {
            run_scheduler_loop(table, tick, loop_counters, command_rx).await;
        });

        info!("Scheduler task spawned with {}ms tick", tick.as_millis());

        Self {
            command_tx,
            handle: Some(handle),
            counters,
        }
    }

    /// Change the tick period (reconfigures the interval immediately)
    pub fn set_tick(&self, tick: Duration) {
        let _ = self.command_tx.send(SchedulerCommand::SetTick(tick));
    }

    /// Pause automatic ticking
    pub fn pause(&self) {
        let _ = self.command_tx.send(SchedulerCommand::Pause);
    }

    /// Resume automatic ticking
    pub fn resume(&self) {
        let _ = self.command_tx.send(SchedulerCommand::Resume);
    }

    /// Run one tick immediately, regardless of the interval
    pub fn trigger(&self) {
        let _ = self.command_tx.send(SchedulerCommand::Trigger);
    }

    /// Statistics snapshot
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            ticks: self.counters.ticks.load(Ordering::Relaxed),
            executed: self.counters.executed.load(Ordering::Relaxed),
            faults: self.counters.faults.load(Ordering::Relaxed),
            tick_millis: self.counters.tick_millis.load(Ordering::Relaxed),
        }
    }

    /// Shutdown the scheduler task gracefully
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(SchedulerCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Scheduler task shutdown error: {}", e);
            } else {
                info!("Scheduler task shutdown complete");
            }
        }
    }
}

async fn run_scheduler_loop(
    table: ProcessTable,
    tick: Duration,
    counters: Arc<Counters>,
    mut command_rx: mpsc::UnboundedReceiver<SchedulerCommand>,
) {
    let mut active = true;
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!("Scheduler loop started with {}ms tick", tick.as_millis());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if active {
                    counters.ticks.fetch_add(1, Ordering::Relaxed);
                    record(&counters, table.run_next());
                }
            }

            Some(cmd) = command_rx.recv() => {
                match cmd {
                    SchedulerCommand::SetTick(new_tick) => {
                        info!("Scheduler tick updated: {}ms", new_tick.as_millis());
                        counters
                            .tick_millis
                            .store(new_tick.as_millis() as u64, Ordering::Relaxed);
                        interval = tokio::time::interval(new_tick);
                        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                    }

                    SchedulerCommand::Pause => {
                        info!("Scheduler paused");
                        active = false;
                    }

                    SchedulerCommand::Resume => {
                        info!("Scheduler resumed");
                        active = true;
                    }

                    SchedulerCommand::Trigger => {
                        counters.ticks.fetch_add(1, Ordering::Relaxed);
                        record(&counters, table.run_next());
                    }

                    SchedulerCommand::Shutdown => {
                        info!("Scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }
}

fn record(counters: &Counters, outcome: Option<TickOutcome>) {
    match outcome {
        Some(TickOutcome::Completed(_)) => {
            counters.executed.fetch_add(1, Ordering::Relaxed);
        }
        Some(TickOutcome::Faulted(_)) => {
            counters.executed.fetch_add(1, Ordering::Relaxed);
            counters.faults.fetch_add(1, Ordering::Relaxed);
        }
        None => {}
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Attempt graceful shutdown if handle still exists
        if self.handle.is_some() {
            let _ = self.command_tx.send(SchedulerCommand::Shutdown);
        }
    }
}
