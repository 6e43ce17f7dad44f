/*!
 * Crypto Tests
 * Authenticated encryption guarantees beyond the basic roundtrip
 */

use nova_kernel::crypto::{CryptoError, CryptoService};
use pretty_assertions::assert_eq;

#[test]
fn test_tampered_ciphertext_rejected() {
    let crypto = CryptoService::new();
    let key = crypto.derive_key("password");
    let mut payload = crypto.encrypt(&key, "top secret").unwrap();

    payload.data[0] ^= 0x01;

    assert_eq!(
        crypto.decrypt(&key, &payload),
        Err(CryptoError::DecryptionFailed)
    );
}

#[test]
fn test_tampered_iv_rejected() {
    let crypto = CryptoService::new();
    let key = crypto.derive_key("password");
    let mut payload = crypto.encrypt(&key, "top secret").unwrap();

    payload.iv[0] ^= 0x01;

    assert_eq!(
        crypto.decrypt(&key, &payload),
        Err(CryptoError::DecryptionFailed)
    );
}

#[test]
fn test_empty_plaintext_roundtrip() {
    let crypto = CryptoService::new();
    let key = crypto.derive_key("password");
    let payload = crypto.encrypt(&key, "").unwrap();
    assert_eq!(crypto.decrypt(&key, &payload).unwrap(), "");
}

#[test]
fn test_unicode_plaintext_roundtrip() {
    let crypto = CryptoService::new();
    let key = crypto.derive_key("password");
    let payload = crypto.encrypt(&key, "héllo wörld 🔐").unwrap();
    assert_eq!(crypto.decrypt(&key, &payload).unwrap(), "héllo wörld 🔐");
}

#[test]
fn test_payload_json_shape() {
    let crypto = CryptoService::new();
    let key = crypto.derive_key("password");
    let payload = crypto.encrypt(&key, "secret").unwrap();

    let value: serde_json::Value = serde_json::to_value(&payload).unwrap();
    let iv = value["iv"].as_array().unwrap();
    assert_eq!(iv.len(), 12);
    assert!(value["data"].is_array());
}

#[test]
fn test_same_plaintext_distinct_ciphertexts() {
    let crypto = CryptoService::new();
    let key = crypto.derive_key("password");
    let first = crypto.encrypt(&key, "same input").unwrap();
    let second = crypto.encrypt(&key, "same input").unwrap();

    assert_ne!(first.iv, second.iv);
    assert_ne!(first.data, second.data);
}
