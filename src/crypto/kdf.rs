//! Passphrase-based key derivation using Argon2.
//!
//! Argon2 is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  One call produces the raw secret for all three
//! downstream keys; the parameters are embedded in the container's
//! modeline so decryption reproduces the exact same derivation.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::{ArgonboxError, Result};

use super::SALT_LEN;

/// The three Argon2 variants a modeline may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfAlgorithm {
    Argon2d,
    Argon2i,
    Argon2id,
}

impl KdfAlgorithm {
    /// Wire name of the variant, as it appears in the modeline.
    pub fn as_str(self) -> &'static str {
        match self {
            KdfAlgorithm::Argon2d => "argon2d",
            KdfAlgorithm::Argon2i => "argon2i",
            KdfAlgorithm::Argon2id => "argon2id",
        }
    }

    /// Parse a wire name. Returns `None` for anything but the known three.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "argon2d" => Some(KdfAlgorithm::Argon2d),
            "argon2i" => Some(KdfAlgorithm::Argon2i),
            "argon2id" => Some(KdfAlgorithm::Argon2id),
            _ => None,
        }
    }

    fn to_argon2(self) -> Algorithm {
        match self {
            KdfAlgorithm::Argon2d => Algorithm::Argon2d,
            KdfAlgorithm::Argon2i => Algorithm::Argon2i,
            KdfAlgorithm::Argon2id => Algorithm::Argon2id,
        }
    }
}

impl std::fmt::Display for KdfAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete set of KDF parameters carried in a container.
///
/// These map 1:1 to the modeline fields so a decrypting party can
/// reconstruct identical KDF inputs without prior knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Hash variant.
    pub algorithm: KdfAlgorithm,
    /// Argon2 format version (19 = 0x13, the current one).
    pub version: u32,
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of iterations (time cost).
    pub iterations: u32,
    /// Parallelism lanes.
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        KdfPreset::Default.params()
    }
}

impl KdfParams {
    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            return Err(ArgonboxError::KeyDerivationFailed(
                "iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(ArgonboxError::KeyDerivationFailed(
                "parallelism must be at least 1".into(),
            ));
        }
        if self.memory_kib < 8 * self.parallelism {
            return Err(ArgonboxError::KeyDerivationFailed(format!(
                "memory cost must be at least 8 * parallelism KiB (got {})",
                self.memory_kib
            )));
        }
        Ok(())
    }

    fn argon2_version(&self) -> Result<Version> {
        match self.version {
            0x10 => Ok(Version::V0x10),
            0x13 => Ok(Version::V0x13),
            other => Err(ArgonboxError::KeyDerivationFailed(format!(
                "unsupported Argon2 version {other:#x}"
            ))),
        }
    }
}

/// Named parameter presets selectable from the CLI.
///
/// `Secure` trades minutes of wall-clock time and serious memory for a
/// much higher brute-force cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfPreset {
    Default,
    Secure,
}

impl KdfPreset {
    pub fn params(self) -> KdfParams {
        match self {
            KdfPreset::Default => KdfParams {
                algorithm: KdfAlgorithm::Argon2id,
                version: 0x13,
                memory_kib: 65_536,
                iterations: 3,
                parallelism: 4,
            },
            KdfPreset::Secure => KdfParams {
                algorithm: KdfAlgorithm::Argon2id,
                version: 0x13,
                memory_kib: 20 * 1024 * 1024,
                iterations: 8,
                parallelism: 8,
            },
        }
    }
}

/// Derive `output_len` raw bytes from a passphrase and salt.
///
/// The same passphrase + salt + params always produce the same secret.
/// Fails with `KeyDerivationFailed` on an empty passphrase or salt, or
/// when the primitive rejects the parameters.
pub fn derive_secret(
    passphrase: &[u8],
    salt: &[u8],
    params: &KdfParams,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if passphrase.is_empty() {
        return Err(ArgonboxError::KeyDerivationFailed(
            "passphrase must not be empty".into(),
        ));
    }
    if salt.is_empty() {
        return Err(ArgonboxError::KeyDerivationFailed(
            "salt must not be empty".into(),
        ));
    }
    params.validate()?;

    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(output_len),
    )
    .map_err(|e| ArgonboxError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(
        params.algorithm.to_argon2(),
        params.argon2_version()?,
        argon_params,
    );

    let mut secret = Zeroizing::new(vec![0u8; output_len]);
    argon2
        .hash_password_into(passphrase, salt, &mut secret)
        .map_err(|e| ArgonboxError::KeyDerivationFailed(format!("Argon2 hashing failed: {e}")))?;

    Ok(secret)
}

/// Generate a cryptographically random 64-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
