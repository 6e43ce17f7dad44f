/*!
 * Virtual File System Module
 * In-memory path-to-content store
 */

pub mod memory;
pub mod types;

// Re-exports
pub use memory::MemFs;
pub use types::{FileEntry, VfsError, VfsResult};
