/*!
 * Crypto Module
 * Password-based key derivation and authenticated encryption
 */

pub mod service;
pub mod types;

// Re-exports
pub use service::CryptoService;
pub use types::{CryptoError, CryptoResult, EncryptedPayload, Key};
