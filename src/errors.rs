use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in argonbox.
#[derive(Debug, Error)]
pub enum ArgonboxError {
    // --- Passphrase errors ---
    #[error("No passphrase supplied — cannot derive keys")]
    MissingPassphrase,

    // --- Key derivation errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Derived secret too short: need {needed} bytes, got {got}")]
    InsufficientMaterial { needed: usize, got: usize },

    // --- Container errors ---
    #[error("Not an argonbox container — magic marker missing or wrong")]
    UnrecognizedFormat,

    #[error("Invalid modeline: {0}")]
    InvalidModeline(String),

    #[error("Authentication failed — wrong passphrase or tampered container")]
    AuthenticationFailed,

    // --- Cipher errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — cipher rejected the ciphertext")]
    DecryptionFailed,

    // --- CLI errors ---
    #[error("Output file already exists: {0} (use --overwrite)")]
    OutputExists(PathBuf),

    #[error("Config file error: {0}")]
    ConfigError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for argonbox results.
pub type Result<T> = std::result::Result<T, ArgonboxError>;
