//! Splitting one derived secret into independent key material.
//!
//! The KDF is deliberately expensive, so we run it once and slice the
//! output into the cipher key, the IV, and the MAC key instead of paying
//! for three separate derivations.  The split is a fixed-order contiguous
//! partition: no byte feeds more than one output.

use zeroize::Zeroize;

use crate::errors::{ArgonboxError, Result};

use super::{IV_LEN, KEY_LEN, MAC_KEY_LEN};

/// Requested lengths for the three outputs, in split order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLengths {
    pub key: usize,
    pub iv: usize,
    pub mac_key: usize,
}

impl KeyLengths {
    pub fn total(&self) -> usize {
        self.key + self.iv + self.mac_key
    }
}

impl Default for KeyLengths {
    fn default() -> Self {
        Self {
            key: KEY_LEN,
            iv: IV_LEN,
            mac_key: MAC_KEY_LEN,
        }
    }
}

/// The three secrets one encrypt-or-decrypt invocation owns.
///
/// Wiped from memory on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeyMaterial {
    key: Vec<u8>,
    iv: Vec<u8>,
    mac_key: Vec<u8>,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .field("mac_key", &"<redacted>")
            .finish()
    }
}

impl KeyMaterial {
    /// Partition `secret` into (key, iv, mac_key), in that fixed order.
    ///
    /// Fails with `InsufficientMaterial` if the secret is shorter than the
    /// sum of the requested lengths, or if any requested length is zero —
    /// every cipher/MAC operation needs all three non-empty.
    pub fn split(secret: &[u8], lengths: KeyLengths) -> Result<Self> {
        let needed = lengths.total();
        if lengths.key == 0 || lengths.iv == 0 || lengths.mac_key == 0 {
            return Err(ArgonboxError::InsufficientMaterial {
                needed,
                got: secret.len(),
            });
        }
        if secret.len() < needed {
            return Err(ArgonboxError::InsufficientMaterial {
                needed,
                got: secret.len(),
            });
        }

        let (key, rest) = secret.split_at(lengths.key);
        let (iv, rest) = rest.split_at(lengths.iv);
        let mac_key = &rest[..lengths.mac_key];

        Ok(Self {
            key: key.to_vec(),
            iv: iv.to_vec(),
            mac_key: mac_key.to_vec(),
        })
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn mac_key(&self) -> &[u8] {
        &self.mac_key
    }
}
