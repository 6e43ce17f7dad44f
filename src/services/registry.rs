/*!
 * Service Registry
 * Name-to-capability table with fail-fast registration
 */

use super::types::{Service, ServiceError, ServiceResult};
use ahash::RandomState;
use dashmap::DashMap;
use log::info;
use std::sync::Arc;

/// Service registry
///
/// Names may not be rebound: a collision is programmer error, surfaced as
/// `AlreadyRegistered`. Late registration (e.g. from a module loaded after
/// boot) is fine.
pub struct ServiceRegistry {
    services: Arc<DashMap<String, Arc<dyn Service>, RandomState>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            services: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    /// Register a capability under a unique name
    pub fn register(
        &self,
        name: impl Into<String>,
        service: Arc<dyn Service>,
    ) -> ServiceResult<()> {
        let name = name.into();
        match self.services.entry(name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(ServiceError::AlreadyRegistered(name))
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(service);
                info!("Registered service \"{}\"", name);
                Ok(())
            }
        }
    }

    /// Invoke a registered capability
    ///
    /// The callee's success or failure is propagated unchanged.
    pub fn call(&self, name: &str, args: &[String]) -> ServiceResult<String> {
        let service = self
            .services
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))?;
        service.call(args)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Registered service names (unordered)
    pub fn names(&self) -> Vec<String> {
        self.services.iter().map(|e| e.key().clone()).collect()
    }
}

impl Clone for ServiceRegistry {
    fn clone(&self) -> Self {
        Self {
            services: Arc::clone(&self.services),
        }
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_call() {
        let registry = ServiceRegistry::new();
        registry
            .register("echo", Arc::new(|args: &[String]| Ok(args.join(" "))))
            .unwrap();

        let result = registry.call("echo", &["hi".to_string()]).unwrap();
        assert_eq!(result, "hi");
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = ServiceRegistry::new();
        registry
            .register("echo", Arc::new(|args: &[String]| Ok(args.join(" "))))
            .unwrap();

        let result = registry.register("echo", Arc::new(|_: &[String]| Ok(String::new())));
        assert_eq!(
            result,
            Err(ServiceError::AlreadyRegistered("echo".to_string()))
        );
    }

    #[test]
    fn test_unknown_service_fails() {
        let registry = ServiceRegistry::new();
        assert_eq!(
            registry.call("missing", &[]),
            Err(ServiceError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_failure_propagates_unchanged() {
        let registry = ServiceRegistry::new();
        registry
            .register(
                "flaky",
                Arc::new(|_: &[String]| Err(ServiceError::Failed("nope".to_string()))),
            )
            .unwrap();

        assert_eq!(
            registry.call("flaky", &[]),
            Err(ServiceError::Failed("nope".to_string()))
        );
    }
}
