//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::container::Modeline;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a container's KDF parameters as a two-column table.
pub fn print_modeline_table(modeline: &Modeline) {
    let p = &modeline.params;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Parameter", "Value"]);

    table.add_row(vec!["Hash variant".to_string(), p.algorithm.to_string()]);
    table.add_row(vec!["Version".to_string(), format!("{:#x}", p.version)]);
    table.add_row(vec!["Memory (KiB)".to_string(), p.memory_kib.to_string()]);
    table.add_row(vec!["Iterations".to_string(), p.iterations.to_string()]);
    table.add_row(vec!["Parallelism".to_string(), p.parallelism.to_string()]);
    table.add_row(vec!["Salt length".to_string(), modeline.salt.len().to_string()]);

    println!("{table}");
}
