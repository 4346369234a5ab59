mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    cli::context::init(args.config.as_deref(), args.verbose);

    let result = match &args.command {
        Commands::Add { file } => cli::commands::add::execute(
            file.as_deref(),
            args.hostname.as_deref(),
            args.token.as_deref(),
        ),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
