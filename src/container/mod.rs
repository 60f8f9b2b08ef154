//! The authenticated ciphertext container.
//!
//! A container is four newline-delimited text records:
//!
//! ```text
//! argonbox/v1
//! $argon2id$v=13$m=65536,t=3,p=4$<base64-salt>
//! <base64 HMAC-SHA512 over the ciphertext>
//! <base64 ciphertext>
//! ```
//!
//! Composition is encrypt-then-MAC: the tag covers the ciphertext, so a
//! corrupted container is detected before any decryption is attempted.
//! On the way back in, the magic marker is checked before any
//! cryptographic work, and plaintext is only ever produced after the tag
//! verifies.

pub mod modeline;

pub use modeline::Modeline;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::crypto::{self, KdfParams, KeyLengths, KeyMaterial, DERIVED_LEN};
use crate::errors::{ArgonboxError, Result};

/// Magic marker on the first line of every container.
pub const MAGIC: &str = "argonbox/v1";

type HmacSha512 = Hmac<Sha512>;

/// Encrypt `plaintext` under `passphrase` into a serialized container.
///
/// A fresh random salt is generated per call, so encrypting the same
/// input twice yields entirely different containers.
pub fn seal(plaintext: &[u8], passphrase: &str, params: &KdfParams) -> Result<String> {
    if passphrase.is_empty() {
        return Err(ArgonboxError::MissingPassphrase);
    }

    let salt = crypto::generate_salt();
    let keys = derive_key_material(passphrase, &salt, params)?;

    let mut ciphertext = plaintext.to_vec();
    crypto::apply_keystream(keys.key(), keys.iv(), &mut ciphertext)?;

    let tag = compute_mac(keys.mac_key(), &ciphertext)?;

    let modeline = Modeline::new(*params, salt.to_vec()).encode();
    Ok(format!(
        "{MAGIC}\n{modeline}\n{mac}\n{ct}\n",
        mac = BASE64.encode(tag),
        ct = BASE64.encode(&ciphertext),
    ))
}

/// Verify and decrypt a serialized container.
///
/// No plaintext is ever returned — or even computed — unless the MAC
/// verifies against the received ciphertext.
pub fn open(raw: &[u8], passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    let records = parse_records(raw)?;

    let modeline = Modeline::decode(records.modeline)?;

    let ciphertext = decode_base64_record(records.ciphertext_b64)
        .ok_or(ArgonboxError::UnrecognizedFormat)?;

    if passphrase.is_empty() {
        return Err(ArgonboxError::MissingPassphrase);
    }

    let keys = derive_key_material(passphrase, &modeline.salt, &modeline.params)?;

    verify_mac(keys.mac_key(), &ciphertext, records.mac_b64)?;

    let mut plaintext = Zeroizing::new(ciphertext);
    crypto::apply_keystream(keys.key(), keys.iv(), &mut plaintext)
        .map_err(|_| ArgonboxError::DecryptionFailed)?;

    Ok(plaintext)
}

/// Parse the magic marker and modeline without deriving any keys.
///
/// This is all the information a container reveals to someone without
/// the passphrase.
pub fn inspect(raw: &[u8]) -> Result<Modeline> {
    let records = parse_records(raw)?;
    Modeline::decode(records.modeline)
}

/// The four logical records, still text-encoded.
struct Records<'a> {
    modeline: &'a str,
    mac_b64: &'a str,
    ciphertext_b64: &'a str,
}

/// Split the input into its four records and check the magic marker.
///
/// The ciphertext record is the remainder of the input, so base64 with
/// embedded line wrapping still parses.  The magic check happens here,
/// before anything else looks at the container.
fn parse_records(raw: &[u8]) -> Result<Records<'_>> {
    let text = std::str::from_utf8(raw).map_err(|_| ArgonboxError::UnrecognizedFormat)?;

    let mut lines = text.splitn(4, '\n');
    let magic = lines.next().unwrap_or("");
    if magic.trim_end() != MAGIC {
        return Err(ArgonboxError::UnrecognizedFormat);
    }

    let modeline = lines.next().ok_or(ArgonboxError::UnrecognizedFormat)?;
    let mac_b64 = lines.next().ok_or(ArgonboxError::UnrecognizedFormat)?;
    let ciphertext_b64 = lines.next().ok_or(ArgonboxError::UnrecognizedFormat)?;

    Ok(Records {
        modeline: modeline.trim_end(),
        mac_b64: mac_b64.trim_end(),
        ciphertext_b64,
    })
}

/// Decode a base64 record, tolerating embedded newlines and whitespace.
fn decode_base64_record(record: &str) -> Option<Vec<u8>> {
    let compact: String = record.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64.decode(compact).ok()
}

/// One KDF call, split into cipher key, IV, and MAC key.
fn derive_key_material(passphrase: &str, salt: &[u8], params: &KdfParams) -> Result<KeyMaterial> {
    let secret = crypto::derive_secret(passphrase.as_bytes(), salt, params, DERIVED_LEN)?;
    KeyMaterial::split(&secret, KeyLengths::default())
}

/// Compute HMAC-SHA512 over the ciphertext.
fn compute_mac(mac_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha512::new_from_slice(mac_key)
        .map_err(|e| ArgonboxError::EncryptionFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(ciphertext);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Recompute the MAC over the received ciphertext and compare.
///
/// The comparison is full-length and exact (`Mac::verify_slice`); a
/// missing, empty, or undecodable MAC record fails the same way a
/// mismatched one does.  On failure the caller must not decrypt.
fn verify_mac(mac_key: &[u8], ciphertext: &[u8], mac_b64: &str) -> Result<()> {
    if mac_b64.is_empty() {
        return Err(ArgonboxError::AuthenticationFailed);
    }
    let expected =
        decode_base64_record(mac_b64).ok_or(ArgonboxError::AuthenticationFailed)?;

    let mut mac = HmacSha512::new_from_slice(mac_key)
        .map_err(|_| ArgonboxError::AuthenticationFailed)?;
    mac.update(ciphertext);
    mac.verify_slice(&expected)
        .map_err(|_| ArgonboxError::AuthenticationFailed)
}
