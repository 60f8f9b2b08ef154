//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{ArgonboxError, Result};

/// File extension given to containers when no output path is supplied.
pub const CONTAINER_EXT: &str = "abx";

/// argonbox CLI: passphrase-based file encryption.
#[derive(Parser)]
#[command(
    name = "argonbox",
    about = "Passphrase-based file encryption with Argon2 and encrypt-then-MAC",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Passphrase (for scripted use; prompts interactively when absent)
    #[arg(long, global = true, env = "ARGONBOX_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Read the passphrase from a file (first line, trailing newline stripped)
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "passphrase")]
    pub passphrase_file: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a file into an authenticated container
    Encrypt(EncryptArgs),

    /// Verify and decrypt a container
    Decrypt(DecryptArgs),

    /// Show a container's KDF parameters without decrypting
    Inspect(InspectArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

#[derive(clap::Args)]
pub struct EncryptArgs {
    /// File to encrypt
    pub input: PathBuf,

    /// Output path (default: <input>.abx)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the hardened preset, overriding all four cost parameters at once
    #[arg(long)]
    pub secure: bool,

    /// Hash variant: argon2d, argon2i, or argon2id
    #[arg(long)]
    pub variant: Option<String>,

    /// Argon2 memory cost in KiB
    #[arg(long, value_name = "KIB")]
    pub memory_kib: Option<u32>,

    /// Argon2 iteration count
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Argon2 parallelism degree
    #[arg(long)]
    pub parallelism: Option<u32>,

    /// Argon2 format version, decimal (16 or 19)
    #[arg(long, value_name = "VER")]
    pub kdf_version: Option<u32>,

    /// Allow overwriting an existing output file
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(clap::Args)]
pub struct DecryptArgs {
    /// Container to decrypt
    pub input: PathBuf,

    /// Output path (default: input with .abx stripped, else <input>.dec)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Allow overwriting an existing output file
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Container to inspect
    pub input: PathBuf,

    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve a pre-supplied passphrase, trying in order:
/// 1. `--passphrase` flag / `ARGONBOX_PASSPHRASE` env var (CI/CD)
/// 2. `--passphrase-file`
///
/// Returns `None` when neither is present so the caller can fall back to
/// an interactive prompt.  Returns `Zeroizing<String>` so the passphrase
/// is wiped from memory on drop.
pub fn resolve_passphrase(cli: &Cli) -> Result<Option<Zeroizing<String>>> {
    if let Some(pw) = &cli.passphrase {
        if pw.is_empty() {
            return Err(ArgonboxError::MissingPassphrase);
        }
        return Ok(Some(Zeroizing::new(pw.clone())));
    }

    if let Some(path) = &cli.passphrase_file {
        let contents = Zeroizing::new(fs::read_to_string(path)?);
        let pw = contents.lines().next().unwrap_or("").to_string();
        if pw.is_empty() {
            return Err(ArgonboxError::MissingPassphrase);
        }
        return Ok(Some(Zeroizing::new(pw)));
    }

    Ok(None)
}

/// Prompt for an existing passphrase (used during `decrypt`).
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Enter passphrase")
        .interact()
        .map_err(|e| ArgonboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    if pw.is_empty() {
        return Err(ArgonboxError::MissingPassphrase);
    }
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (used during `encrypt`).
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Choose passphrase")
        .with_confirmation("Confirm passphrase", "Passphrases do not match, try again")
        .interact()
        .map_err(|e| ArgonboxError::CommandFailed(format!("passphrase prompt: {e}")))?;
    if pw.is_empty() {
        return Err(ArgonboxError::MissingPassphrase);
    }
    Ok(Zeroizing::new(pw))
}

/// Refuse to clobber an existing output file unless `--overwrite` was given.
pub fn check_output(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(ArgonboxError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

/// Write a file to disk **atomically**.
///
/// Writes to a temp file in the same directory and renames it over the
/// target path, so readers never see a half-written file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
