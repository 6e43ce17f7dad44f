/*!
 * Error Types
 * Unified kernel error built from per-subsystem errors with thiserror
 */

use thiserror::Error;

// Re-export subsystem errors so callers can discriminate kinds
pub use crate::crypto::CryptoError;
pub use crate::events::EventError;
pub use crate::process::ProcessError;
pub use crate::services::ServiceError;
pub use crate::vfs::VfsError;

/// Unified kernel error type
///
/// The kernel API layer raises these (or the subsystem errors they wrap)
/// to its direct caller. The command dispatcher is the terminal boundary
/// that converts them into display strings.
#[derive(Error, Debug, Clone)]
pub enum KernelError {
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    #[error("File system error: {0}")]
    Vfs(#[from] VfsError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Event bus error: {0}")]
    Event(#[from] EventError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for KernelError {
    fn from(msg: String) -> Self {
        KernelError::Internal(msg)
    }
}

impl From<&str> for KernelError {
    fn from(msg: &str) -> Self {
        KernelError::Internal(msg.to_string())
    }
}

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;
