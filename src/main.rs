//! Pokedex CLI - An interactive Pokedex backed by the PokeAPI
//!
//! A REPL that lists location areas, explores them, and catches pokemon.
//! Fetched API responses are kept in an in-memory cache with a configurable
//! TTL so revisiting a page or area does not refetch it.

use std::process::ExitCode;

use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use pokedex::cache::Cache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::commands::App;

/// Prints the REPL prompt without a trailing newline
async fn print_prompt(stdout: &mut io::Stdout) -> io::Result<()> {
    stdout.write_all(b"pokedex > ").await?;
    stdout.flush().await
}

/// Runs the read/dispatch loop until `exit` or end of input
async fn run_repl(app: &mut App) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    print_prompt(&mut stdout).await?;
    while let Some(line) = lines.next_line().await? {
        if let Err(err) = app.dispatch(&line).await {
            eprintln!("{}", err);
        }
        if app.should_quit {
            break;
        }
        print_prompt(&mut stdout).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let cache = Cache::new(config.cache_ttl);
    let mut app = App::new(cache.clone());

    let result = run_repl(&mut app).await;

    // Stop the background sweep task before leaving
    cache.shutdown().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
