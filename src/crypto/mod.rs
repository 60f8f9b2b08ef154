//! Cryptographic primitives for argonbox.
//!
//! This module provides:
//! - Argon2 passphrase-based key derivation (`kdf`)
//! - Deterministic key material splitting (`keys`)
//! - AES-256-CTR keystream application (`cipher`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_secret, KdfParams, KeyMaterial, ...};
pub use cipher::apply_keystream;
pub use kdf::{derive_secret, generate_salt, KdfAlgorithm, KdfParams, KdfPreset};
pub use keys::{KeyLengths, KeyMaterial};

/// Length of the random salt in bytes (512 bits).
pub const SALT_LEN: usize = 64;

/// Length of the AES-256 cipher key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the CTR initialization vector in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Length of the HMAC-SHA512 key in bytes.
pub const MAC_KEY_LEN: usize = 64;

/// Total length of the derived secret: one KDF call covers all three keys.
pub const DERIVED_LEN: usize = KEY_LEN + IV_LEN + MAC_KEY_LEN;
