//! `argonbox inspect` — show a container's KDF parameters.
//!
//! Needs no passphrase: the modeline is the public, self-describing part
//! of the container.

use std::fs;

use serde::Serialize;

use crate::cli::output;
use crate::cli::{Cli, InspectArgs};
use crate::container;
use crate::errors::{ArgonboxError, Result};

/// JSON shape for `inspect --json`.
#[derive(Serialize)]
struct ContainerInfo {
    variant: String,
    version: u32,
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
    salt_len: usize,
}

/// Execute the `inspect` command.
pub fn execute(_cli: &Cli, args: &InspectArgs) -> Result<()> {
    let raw = fs::read(&args.input)?;
    let modeline = container::inspect(&raw)?;

    if args.json {
        let info = ContainerInfo {
            variant: modeline.params.algorithm.to_string(),
            version: modeline.params.version,
            memory_kib: modeline.params.memory_kib,
            iterations: modeline.params.iterations,
            parallelism: modeline.params.parallelism,
            salt_len: modeline.salt.len(),
        };
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| ArgonboxError::CommandFailed(format!("JSON encoding: {e}")))?;
        println!("{json}");
    } else {
        output::print_modeline_table(&modeline);
    }

    Ok(())
}
