/*!
 * In-Memory File System
 * Flat, volatile path-to-content store with insertion-order listing
 */

use super::types::{FileEntry, VfsError, VfsResult};
use ahash::RandomState;
use dashmap::DashMap;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory file system
///
/// No hierarchy: every path is an opaque unique key. Contents live only for
/// the process lifetime.
pub struct MemFs {
    files: Arc<DashMap<String, FileEntry, RandomState>>,
    // Insertion order of live paths, for stable listing
    order: Arc<RwLock<Vec<String>>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self {
            files: Arc::new(DashMap::with_hasher(RandomState::new())),
            order: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create or overwrite a file
    pub fn write(&self, path: &str, content: impl Into<Vec<u8>>) -> VfsResult<()> {
        if path.is_empty() {
            return Err(VfsError::InvalidPath("empty path".to_string()));
        }

        let previous = self.files.insert(path.to_string(), FileEntry::new(content.into()));
        if previous.is_none() {
            self.order.write().push(path.to_string());
        }
        debug!("Wrote file at {}", path);
        Ok(())
    }

    /// Read a file's content
    pub fn read(&self, path: &str) -> VfsResult<Vec<u8>> {
        self.files
            .get(path)
            .map(|entry| entry.content.clone())
            .ok_or_else(|| VfsError::NotFound(path.to_string()))
    }

    /// Delete a file
    pub fn delete(&self, path: &str) -> VfsResult<()> {
        self.files
            .remove(path)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        self.order.write().retain(|p| p != path);
        debug!("Deleted file at {}", path);
        Ok(())
    }

    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Snapshot of all paths in insertion order
    pub fn list(&self) -> Vec<String> {
        self.order.read().clone()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Clone for MemFs {
    fn clone(&self) -> Self {
        Self {
            files: Arc::clone(&self.files),
            order: Arc::clone(&self.order),
        }
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}
