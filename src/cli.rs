//! Command-line interface parsing for the Pokedex CLI
//!
//! This module handles parsing of CLI arguments using clap, currently just
//! the --cache-ttl flag controlling how long API responses stay cached.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The cache TTL must be a positive number of seconds
    #[error("Invalid cache TTL: {0}. The TTL must be at least 1 second")]
    InvalidTtl(u64),
}

/// Pokedex CLI - Browse PokeAPI locations, explore areas, and catch pokemon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "An interactive Pokedex REPL backed by the PokeAPI")]
#[command(version)]
pub struct Cli {
    /// How long fetched API responses stay cached, in seconds
    ///
    /// Repeated map/explore lookups within this window are served from the
    /// in-memory cache instead of hitting the network. Must be at least 1.
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    pub cache_ttl: u64,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// TTL for the API response cache
    pub cache_ttl: Duration,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the TTL is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_ttl == 0 {
            return Err(CliError::InvalidTtl(cli.cache_ttl));
        }
        Ok(StartupConfig {
            cache_ttl: Duration::from_secs(cli.cache_ttl),
        })
    }
}
