/*!
 * Built-in Services
 * Capabilities registered at kernel construction
 */

use super::registry::ServiceRegistry;
use super::types::{Service, ServiceResult};
use std::sync::Arc;
use std::time::Instant;

/// Echoes its arguments back, space-joined
struct EchoService;

impl Service for EchoService {
    fn call(&self, args: &[String]) -> ServiceResult<String> {
        Ok(args.join(" "))
    }
}

/// Reports seconds since kernel construction
struct UptimeService {
    started: Instant,
}

impl Service for UptimeService {
    fn call(&self, _args: &[String]) -> ServiceResult<String> {
        Ok(format!("{}s", self.started.elapsed().as_secs()))
    }
}

/// Register the default capability set
///
/// Called once during kernel wiring, before any user registration can
/// collide with these names.
pub fn register_builtin_services(registry: &ServiceRegistry, started: Instant) {
    // Collisions here would mean wiring ran twice; surface loudly.
    registry
        .register("echo", Arc::new(EchoService))
        .unwrap_or_else(|e| log::error!("Built-in service registration failed: {}", e));
    registry
        .register("uptime", Arc::new(UptimeService { started }))
        .unwrap_or_else(|e| log::error!("Built-in service registration failed: {}", e));
}
