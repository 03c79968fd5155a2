//! AES-256-GCM encryption for cookie values at rest.
//!
//! The stored format is `base64(nonce || ciphertext)` with a fresh random
//! 12-byte nonce per encryption, so encrypting the same cookie twice never
//! produces the same ciphertext.

use crate::error::{Result, StoreError};
use crate::secure_string::SecureString;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// GCM standard nonce length.
const NONCE_LEN: usize = 12;

/// Process-wide cookie cipher.
///
/// The 256-bit key is derived once from the configured key string and held
/// for the lifetime of the store. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct CookieCipher {
    key: [u8; 32],
}

impl CookieCipher {
    /// Derive the cipher from the configured key string.
    pub(crate) fn new(master_key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(master_key.as_bytes());
        hasher.update(b"likedin-cookie-store-v1"); // domain separation
        let digest = hasher.finalize();

        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    /// Encrypt a cookie value for storage.
    pub(crate) fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| StoreError::Encryption(format!("failed to create cipher: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| StoreError::Encryption(format!("encryption failed: {e}")))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend(ciphertext);
        Ok(BASE64.encode(combined))
    }

    /// Decrypt a stored value back to the cookie.
    ///
    /// Any failure (bad base64, truncated data, GCM authentication failure,
    /// non-UTF-8 plaintext) maps to `DecryptionFailed` — the ciphertext is
    /// unreadable under the current key either way.
    pub(crate) fn decrypt(&self, encoded: &str) -> Result<SecureString> {
        let combined = BASE64
            .decode(encoded.trim())
            .map_err(|_| StoreError::DecryptionFailed)?;
        if combined.len() < NONCE_LEN {
            return Err(StoreError::DecryptionFailed);
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|_| StoreError::DecryptionFailed)?;

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| StoreError::DecryptionFailed)?;

        let value = String::from_utf8(plaintext).map_err(|_| StoreError::DecryptionFailed)?;
        Ok(SecureString::new(value))
    }
}

impl std::fmt::Debug for CookieCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
