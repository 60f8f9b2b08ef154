use clap::Parser;

use argonbox::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Encrypt(args) => argonbox::cli::commands::encrypt::execute(&cli, args),
        Commands::Decrypt(args) => argonbox::cli::commands::decrypt::execute(&cli, args),
        Commands::Inspect(args) => argonbox::cli::commands::inspect::execute(&cli, args),
        Commands::Completions { shell } => argonbox::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        argonbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
