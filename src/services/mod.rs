/*!
 * Services Module
 * Named, pluggable kernel capabilities
 */

pub mod builtin;
pub mod registry;
pub mod types;

// Re-exports
pub use builtin::register_builtin_services;
pub use registry::ServiceRegistry;
pub use types::{Service, ServiceError, ServiceResult};
