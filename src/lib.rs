//! Spotify Top Items CLI Library
//!
//! This library authenticates against the Spotify Web API with the OAuth 2.0
//! Authorization Code flow and PKCE, reads the user's profile and top
//! artists/tracks, and derives summary statistics from them.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type shared by all modules
//! - `management` - Access token cache
//! - `pkce` - Code verifier and challenge generation
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Authorization flow and Web API client
//! - `stats` - Popularity averages and per-artist track counts
//! - `store` - Persisted key-value store carrying the verifier across the redirect
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use sportop::{config, spotify::SpotifyClient, stats};
//!
//! #[tokio::main]
//! async fn main() -> sportop::Result<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let client = SpotifyClient::new(&config)?;
//!     let dashboard = client.dashboard("BQC...", &Default::default()).await?;
//!     let summary = stats::aggregate(&dashboard.artists, &dashboard.tracks, Default::default())?;
//!     println!("{:.1}", summary.average_artist_popularity);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pkce;
pub mod server;
pub mod spotify;
pub mod stats;
pub mod store;
pub mod types;

pub use error::{Error, Result};

/// `[o] message` in blue, for progress and general status.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// `[✓] message` in green, once an operation completed.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// `[!] message` in red, then exits with status 1.
///
/// Only the command layer uses this; library functions return
/// [`Error`] instead. The expansion diverges, so it can stand in for a value
/// in a `match` arm:
///
/// ```
/// let config = match Config::from_env() {
///     Ok(c) => c,
///     Err(e) => error!("Invalid configuration: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// `[!] message` in yellow, for problems the command can continue past.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
