/*!
 * Service Types
 * Capability trait and errors
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service operation result
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceError {
    #[error("Service \"{0}\" not found")]
    NotFound(String),

    #[error("Service \"{0}\" is already registered")]
    AlreadyRegistered(String),

    #[error("{0}")]
    Failed(String),
}

/// A named kernel capability
///
/// Services are singletons: a name binds exactly one capability for the
/// kernel's lifetime. Call results propagate to the caller unchanged.
pub trait Service: Send + Sync {
    fn call(&self, args: &[String]) -> ServiceResult<String>;
}

// Plain functions and closures are services too
impl<F> Service for F
where
    F: Fn(&[String]) -> ServiceResult<String> + Send + Sync,
{
    fn call(&self, args: &[String]) -> ServiceResult<String> {
        self(args)
    }
}
