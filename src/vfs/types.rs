/*!
 * VFS Types
 * Shared types for file system operations
 */

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

/// VFS operation result
pub type VfsResult<T> = Result<T, VfsError>;

/// VFS errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VfsError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// A stored file
///
/// Paths are unique keys; entries are created or overwritten by write and
/// destroyed by delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileEntry {
    pub content: Vec<u8>,
    pub created: SystemTime,
}

impl FileEntry {
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            content,
            created: SystemTime::now(),
        }
    }
}
