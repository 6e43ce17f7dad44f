/*!
 * Dispatch Types
 * Command handler errors
 */

use crate::core::errors::KernelError;
use crate::crypto::CryptoError;
use crate::events::EventError;
use crate::process::ProcessError;
use crate::services::ServiceError;
use crate::vfs::VfsError;
use thiserror::Error;

/// Command handler result
pub type CommandResult<T> = Result<T, CommandError>;

/// Command handler errors
///
/// Every variant ends up as a display string at the dispatch boundary;
/// nothing here escapes to the interactive surface as a fault.
#[derive(Error, Debug, Clone)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Kernel(#[from] KernelError),
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        Self::Kernel(err.into())
    }
}

impl From<VfsError> for CommandError {
    fn from(err: VfsError) -> Self {
        Self::Kernel(err.into())
    }
}

impl From<CryptoError> for CommandError {
    fn from(err: CryptoError) -> Self {
        Self::Kernel(err.into())
    }
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        Self::Kernel(err.into())
    }
}

impl From<EventError> for CommandError {
    fn from(err: EventError) -> Self {
        Self::Kernel(err.into())
    }
}
