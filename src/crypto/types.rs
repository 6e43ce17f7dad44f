/*!
 * Crypto Types
 * Key material and encrypted payload shapes
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crypto operation result
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Crypto errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CryptoError {
    #[error("Key rejected by cipher")]
    KeyRejected,

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed: wrong key or tampered ciphertext")]
    DecryptionFailed,
}

/// Derived 256-bit encryption key
///
/// Thin wrapper around the raw key bytes; the material is zeroed on drop.
#[derive(Clone)]
pub struct Key([u8; 32]);

impl Key {
    pub(crate) fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        // Zero out key material on drop
        self.0.fill(0);
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key(..)")
    }
}

/// Encrypted payload: 96-bit nonce plus ciphertext with appended GCM tag
///
/// This exact shape round-trips through decrypt (and through serde_json as
/// `{"iv": [..12 bytes], "data": [..]}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EncryptedPayload {
    pub iv: [u8; 12],
    pub data: Vec<u8>,
}
