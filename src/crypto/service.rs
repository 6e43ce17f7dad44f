/*!
 * Crypto Service
 * PBKDF2 key derivation plus AES-256-GCM authenticated encryption
 */

use super::types::{CryptoError, CryptoResult, EncryptedPayload, Key};
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use log::debug;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Fixed key-derivation salt
///
/// Determinism is intentional: the same password always derives the same
/// key, and brute-force cost is bounded by the iteration count.
const KEY_SALT: &[u8] = b"novaSalt";

/// PBKDF2 iteration count
const KEY_ROUNDS: u32 = 100_000;

/// Crypto service
///
/// Stateless; callers hold derived keys and pass them to each call.
#[derive(Debug, Clone, Default)]
pub struct CryptoService;

impl CryptoService {
    pub fn new() -> Self {
        Self
    }

    /// Derive a 256-bit key from a password
    ///
    /// Deterministic for a fixed (password, salt, rounds, hash) tuple:
    /// PBKDF2-HMAC-SHA256 over the fixed salt.
    pub fn derive_key(&self, password: &str) -> Key {
        let mut bytes = [0u8; 32];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), KEY_SALT, KEY_ROUNDS, &mut bytes);
        debug!("Derived key from password ({} rounds)", KEY_ROUNDS);
        Key::new(bytes)
    }

    /// Encrypt plaintext under a derived key
    ///
    /// A fresh 96-bit nonce is drawn from the OS RNG on every call; nonces
    /// are never reused under the same key.
    pub fn encrypt(&self, key: &Key, plaintext: &str) -> CryptoResult<EncryptedPayload> {
        let cipher =
            Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::KeyRejected)?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let data = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        let mut iv = [0u8; 12];
        iv.copy_from_slice(&nonce);
        Ok(EncryptedPayload { iv, data })
    }

    /// Decrypt a payload under a derived key
    ///
    /// The GCM tag is verified before any plaintext is returned: a wrong key
    /// or any flipped bit in the iv or ciphertext fails, never producing
    /// garbage plaintext.
    pub fn decrypt(&self, key: &Key, payload: &EncryptedPayload) -> CryptoResult<String> {
        let cipher =
            Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::KeyRejected)?;

        let plaintext = cipher
            .decrypt(Nonce::from_slice(&payload.iv), payload.data.as_slice())
            .map_err(|_| CryptoError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
    }
}
