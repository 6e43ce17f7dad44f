/*!
 * Kernel Context
 * Explicit context object wiring every subsystem together
 *
 * There is no ambient global state: the kernel is constructed once and
 * handed to the dispatcher and any other consumer. All mutation goes
 * through the subsystem APIs it exposes.
 */

use crate::crypto::CryptoService;
use crate::events::EventBus;
use crate::process::{ProcessStatus, ProcessTable, Scheduler, DEFAULT_TICK};
use crate::services::{register_builtin_services, ServiceRegistry};
use crate::vfs::MemFs;
use log::info;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Kernel construction parameters
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Scheduler tick period
    pub tick: Duration,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self { tick: DEFAULT_TICK }
    }
}

impl KernelConfig {
    /// Read overrides from the environment
    ///
    /// - KERNEL_TICK_MS: scheduler tick period in milliseconds
    pub fn from_env() -> Self {
        let tick = std::env::var("KERNEL_TICK_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TICK);
        Self { tick }
    }
}

/// The kernel: one instance owns every subsystem
///
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone)]
pub struct Kernel {
    processes: ProcessTable,
    scheduler: Arc<Scheduler>,
    events: EventBus,
    vfs: MemFs,
    crypto: CryptoService,
    services: ServiceRegistry,
    started: Instant,
}

impl Kernel {
    /// Construct the kernel and start its background tasks
    ///
    /// Must run inside a tokio runtime: the scheduler tick loop and the
    /// event-bus actor are spawned here.
    pub fn new(config: KernelConfig) -> Self {
        let started = Instant::now();

        info!("Initializing process table...");
        let processes = ProcessTable::new();

        info!("Spawning scheduler ({}ms tick)...", config.tick.as_millis());
        let scheduler = Arc::new(Scheduler::spawn_with_tick(processes.clone(), config.tick));

        info!("Spawning event bus...");
        let events = EventBus::spawn();

        info!("Initializing virtual file system...");
        let vfs = MemFs::new();

        let crypto = CryptoService::new();

        info!("Registering built-in services...");
        let services = ServiceRegistry::new();
        register_builtin_services(&services, started);

        info!("Kernel initialization complete");

        Self {
            processes,
            scheduler,
            events,
            vfs,
            crypto,
            services,
            started,
        }
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn vfs(&self) -> &MemFs {
        &self.vfs
    }

    pub fn crypto(&self) -> &CryptoService {
        &self.crypto
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Broadcast a message notification to every running process
    ///
    /// Each delivery is published on the `process.message` event type;
    /// returns the number of processes notified.
    pub fn broadcast(&self, message: &str) -> usize {
        let mut delivered = 0;
        for process in self.processes.list() {
            if process.status == ProcessStatus::Running {
                info!(
                    "[Process {} - {}] received: {}",
                    process.pid, process.name, message
                );
                self.events.publish(
                    "process.message",
                    json!({ "pid": process.pid, "message": message }),
                );
                delivered += 1;
            }
        }
        delivered
    }

    /// Shut down background tasks gracefully
    ///
    /// Best-effort: clones still alive fall back to the Drop-time shutdown
    /// signal.
    pub async fn shutdown(self) {
        let Kernel {
            scheduler, events, ..
        } = self;
        if let Ok(scheduler) = Arc::try_unwrap(scheduler) {
            scheduler.shutdown().await;
        }
        events.shutdown().await;
    }
}
