//! The modeline: KDF parameters + salt as one `$`-delimited text line.
//!
//! Wire form:
//!
//! ```text
//! $argon2id$v=13$m=65536,t=3,p=4$<base64-salt>
//! ```
//!
//! Everything a decrypting party needs to reproduce the key derivation is
//! in here; nothing secret is.  A modeline that carries an extra non-empty
//! field after the salt is treated as a container smuggling key material
//! and rejected outright.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::crypto::{KdfAlgorithm, KdfParams};
use crate::errors::{ArgonboxError, Result};

/// Field delimiter between modeline records.
const DELIMITER: char = '$';

/// Decoded modeline contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modeline {
    pub params: KdfParams,
    pub salt: Vec<u8>,
}

impl Modeline {
    pub fn new(params: KdfParams, salt: Vec<u8>) -> Self {
        Self { params, salt }
    }

    /// Render the one-line text encoding.
    ///
    /// The version is rendered as lowercase hexadecimal; the salt as
    /// standard base64.
    pub fn encode(&self) -> String {
        let p = &self.params;
        format!(
            "{d}{alg}{d}v={ver:x}{d}m={m},t={t},p={par}{d}{salt}",
            d = DELIMITER,
            alg = p.algorithm,
            ver = p.version,
            m = p.memory_kib,
            t = p.iterations,
            par = p.parallelism,
            salt = BASE64.encode(&self.salt),
        )
    }

    /// Parse a modeline produced by `encode` (or a compatible writer).
    pub fn decode(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();

        // Leading empty field, variant, version, settings, salt, and at
        // most one trailing field.
        if fields.len() < 5 || fields.len() > 6 {
            return Err(ArgonboxError::InvalidModeline(format!(
                "expected 5 fields, found {}",
                fields.len()
            )));
        }
        if !fields[0].is_empty() {
            return Err(ArgonboxError::InvalidModeline(
                "modeline must start with the delimiter".into(),
            ));
        }
        if let Some(trailing) = fields.get(5) {
            if !trailing.is_empty() {
                // A populated sixth field means key material was embedded
                // in the container. Hostile; never silently ignored.
                return Err(ArgonboxError::InvalidModeline(
                    "unexpected field after salt — refusing container with embedded secret".into(),
                ));
            }
        }

        let algorithm = KdfAlgorithm::from_name(fields[1]).ok_or_else(|| {
            ArgonboxError::InvalidModeline(format!("unknown hash variant '{}'", fields[1]))
        })?;

        let version_hex = fields[2].strip_prefix("v=").ok_or_else(|| {
            ArgonboxError::InvalidModeline(format!("malformed version field '{}'", fields[2]))
        })?;
        let version = u32::from_str_radix(version_hex, 16).map_err(|_| {
            ArgonboxError::InvalidModeline(format!("version '{version_hex}' is not hexadecimal"))
        })?;

        let (memory_kib, iterations, parallelism) = parse_settings(fields[3])?;

        let salt = BASE64.decode(fields[4]).map_err(|_| {
            ArgonboxError::InvalidModeline("salt is not valid base64".into())
        })?;

        Ok(Self {
            params: KdfParams {
                algorithm,
                version,
                memory_kib,
                iterations,
                parallelism,
            },
            salt,
        })
    }
}

/// Parse the `m=..,t=..,p=..` settings block.
///
/// Pairs are matched by key name, so they may appear in any order, but
/// each of m/t/p must appear exactly once and no other key is allowed.
fn parse_settings(block: &str) -> Result<(u32, u32, u32)> {
    let mut memory_kib: Option<u32> = None;
    let mut iterations: Option<u32> = None;
    let mut parallelism: Option<u32> = None;

    for pair in block.split(',') {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ArgonboxError::InvalidModeline(format!("settings entry '{pair}' is not key=value"))
        })?;

        let slot = match key {
            "m" => &mut memory_kib,
            "t" => &mut iterations,
            "p" => &mut parallelism,
            other => {
                return Err(ArgonboxError::InvalidModeline(format!(
                    "unknown settings key '{other}'"
                )));
            }
        };

        if slot.is_some() {
            return Err(ArgonboxError::InvalidModeline(format!(
                "duplicate settings key '{key}'"
            )));
        }
        *slot = Some(value.parse::<u32>().map_err(|_| {
            ArgonboxError::InvalidModeline(format!("settings value '{value}' is not a number"))
        })?);
    }

    match (memory_kib, iterations, parallelism) {
        (Some(m), Some(t), Some(p)) => Ok((m, t, p)),
        _ => Err(ArgonboxError::InvalidModeline(
            "settings block must contain m, t, and p".into(),
        )),
    }
}
