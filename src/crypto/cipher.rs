//! AES-256-CTR keystream application.
//!
//! CTR mode turns AES into a stream cipher: encryption and decryption are
//! the same XOR against the keystream, so one function serves both
//! directions.  Authentication lives in the container layer (HMAC over
//! the ciphertext); this wrapper does confidentiality only.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};

use crate::errors::{ArgonboxError, Result};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// XOR `buf` in place with the keystream for (key, iv).
///
/// `key` must be 32 bytes and `iv` 16 bytes; anything else is rejected
/// before any byte is touched.
pub fn apply_keystream(key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<()> {
    let mut cipher = Aes256Ctr::new_from_slices(key, iv)
        .map_err(|e| ArgonboxError::EncryptionFailed(format!("invalid key or IV length: {e}")))?;
    cipher.apply_keystream(buf);
    Ok(())
}
