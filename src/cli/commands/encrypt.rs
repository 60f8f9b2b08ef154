//! `argonbox encrypt` — encrypt a file into an authenticated container.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::cli::{
    check_output, prompt_new_passphrase, resolve_passphrase, write_atomic, Cli, EncryptArgs,
    CONTAINER_EXT,
};
use crate::config::Settings;
use crate::container;
use crate::crypto::{KdfAlgorithm, KdfParams, KdfPreset};
use crate::errors::{ArgonboxError, Result};

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, args: &EncryptArgs) -> Result<()> {
    let plaintext = fs::read(&args.input)?;

    // Resolve parameters: config defaults, then the secure preset, then
    // individual flag overrides.
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let params = resolve_params(&settings, args)?;

    let out_path = match &args.output {
        Some(p) => p.clone(),
        None => default_output(&args.input),
    };
    check_output(&out_path, args.overwrite)?;

    // Pre-supplied passphrase, or prompt with confirmation.
    let passphrase = match resolve_passphrase(cli)? {
        Some(pw) => pw,
        None => prompt_new_passphrase()?,
    };

    let sealed = container::seal(&plaintext, &passphrase, &params)?;
    write_atomic(&out_path, sealed.as_bytes())?;

    output::success(&format!(
        "Encrypted {} -> {}",
        args.input.display(),
        out_path.display()
    ));
    if args.secure {
        output::info("Secure preset in effect — decryption needs the same memory budget.");
    }

    Ok(())
}

/// Layer the CLI's parameter flags over the configured defaults.
fn resolve_params(settings: &Settings, args: &EncryptArgs) -> Result<KdfParams> {
    let mut params = if args.secure {
        KdfPreset::Secure.params()
    } else {
        settings.kdf_params()
    };

    if let Some(name) = &args.variant {
        params.algorithm = KdfAlgorithm::from_name(name).ok_or_else(|| {
            ArgonboxError::ConfigError(format!(
                "unknown hash variant '{name}' — expected argon2d, argon2i, or argon2id"
            ))
        })?;
    }
    if let Some(m) = args.memory_kib {
        params.memory_kib = m;
    }
    if let Some(t) = args.iterations {
        params.iterations = t;
    }
    if let Some(p) = args.parallelism {
        params.parallelism = p;
    }
    if let Some(v) = args.kdf_version {
        params.version = v;
    }

    params.validate()?;
    Ok(params)
}

/// Default output path: `<input>.abx` alongside the input.
fn default_output(input: &Path) -> PathBuf {
    let mut out = input.to_path_buf();
    let name = format!(
        "{}.{CONTAINER_EXT}",
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    out.set_file_name(name);
    out
}
