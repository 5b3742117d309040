//! Retort CLI - chemical identifier validation tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let result = match cli.command {
        Commands::Validate {
            file,
            output,
            json,
            delay_ms,
            no_preflight,
            offline,
        } => commands::validate::run(
            file,
            output,
            json,
            delay_ms,
            no_preflight,
            offline,
            cli.verbose,
        ),

        Commands::Cas { values } => commands::cas::run(values),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
