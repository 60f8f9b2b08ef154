//! `argonbox decrypt` — verify and decrypt a container.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::cli::{
    check_output, prompt_passphrase, resolve_passphrase, write_atomic, Cli, DecryptArgs,
    CONTAINER_EXT,
};
use crate::container;
use crate::errors::Result;

/// Execute the `decrypt` command.
///
/// The output file is only written after the container authenticates, so
/// a failed decrypt leaves nothing behind.
pub fn execute(cli: &Cli, args: &DecryptArgs) -> Result<()> {
    let raw = fs::read(&args.input)?;

    let out_path = match &args.output {
        Some(p) => p.clone(),
        None => default_output(&args.input),
    };
    check_output(&out_path, args.overwrite)?;

    // Pre-supplied passphrase, or a single prompt.
    let passphrase = match resolve_passphrase(cli)? {
        Some(pw) => pw,
        None => prompt_passphrase()?,
    };

    let plaintext = container::open(&raw, &passphrase)?;
    write_atomic(&out_path, &plaintext)?;

    output::success(&format!(
        "Decrypted {} -> {}",
        args.input.display(),
        out_path.display()
    ));

    Ok(())
}

/// Default output path: strip a trailing `.abx`, else append `.dec`.
fn default_output(input: &Path) -> PathBuf {
    let mut out = input.to_path_buf();
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    let suffix = format!(".{CONTAINER_EXT}");
    let new_name = match name.strip_suffix(&suffix) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => format!("{name}.dec"),
    };
    out.set_file_name(new_name);
    out
}
