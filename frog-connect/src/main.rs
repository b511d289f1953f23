//! Frog Devtools wallet connection configurator.
//!
//! CLI for generating and checking the TOML configuration the devtools
//! UI boots from.
//!
//! ```sh
//! frog-connect init            # Generate default config.toml
//! frog-connect inspect         # Validate and print the resolved config
//! ```

mod cmd;

use clap::Parser;
use cmd::{Cli, Commands};

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { output, force } => cmd::init::run(&output, force).map_err(Into::into),
        Commands::Inspect { config } => cmd::inspect::run(&config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
