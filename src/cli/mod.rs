//! # CLI Module
//!
//! User-facing commands. Each command loads what it needs (configuration,
//! cached token), delegates to [`crate::spotify`] and [`crate::stats`], and
//! turns the outcome into terminal output.
//!
//! ## Commands
//!
//! ### Authorization
//!
//! - [`auth`] - Runs the PKCE flow through the browser and caches the token
//!
//! ### Reads
//!
//! - [`profile`] - Shows the account the cached token belongs to
//! - [`top_artists`] - Lists the user's top artists as a table
//! - [`top_tracks`] - Lists the user's top tracks as a table
//!
//! ### Summary
//!
//! - [`stats`] - Popularity averages and the per-artist track histogram
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Token cache)
//!     ↓
//! Spotify Layer (PKCE flow, Web API client)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Data Flow
//!
//! ### `auth`
//! 1. **Listener**: Bind the callback server before anything else
//! 2. **Verifier**: Generate and persist it, build the authorization URL
//! 3. **Browser**: Open the URL, or print it if no browser is available
//! 4. **Callback**: The server exchanges the code and records the outcome
//! 5. **Cache**: The token is written for the read commands
//!
//! ### Reads
//! 1. **Token**: Load the cached token, or ask for `sportop auth`
//! 2. **Request**: Fetch with a spinner running
//! 3. **Output**: Render a table, or JSON for `stats --json`
//!
//! ## Error Handling
//!
//! Errors are fatal at this layer: they are printed with [`crate::error!`]
//! and the process exits. A rejected token also removes the cached token so
//! the next run starts from `sportop auth`. Problems the command can finish
//! despite, such as a browser that cannot be opened or a short top-items
//! page, are printed with [`crate::warning!`].
//!
//! ## Usage
//!
//! ```bash
//! sportop auth                              # Authorize with Spotify
//! sportop profile                           # Show the account behind the token
//! sportop top artists --limit 10            # List top artists
//! sportop top tracks --time-range short-term
//! sportop stats --by-item-count             # Popularity averages and artist counts
//! sportop stats --json                      # Same summary for scripts
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, error, management::TokenManager, warning};

mod auth;
mod profile;
mod stats;
mod top;

pub use auth::auth;
pub use profile::profile;
pub use stats::stats;
pub use top::{top_artists, top_tracks};

/// Loads the cached token or exits with a hint to run `sportop auth`.
async fn load_token() -> TokenManager {
    match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run sportop auth\n Error: {}",
                e
            );
        }
    }
}

/// Drops the cached token if Spotify rejected it.
///
/// Returns `true` if the cache file is gone afterwards. A failed removal is
/// reported as a warning; the command still fails with the original error.
async fn forget_if_rejected(token_mgr: TokenManager, e: &Error) -> bool {
    if !matches!(e, Error::Unauthorized) {
        return false;
    }

    match token_mgr.clear().await {
        Ok(()) => true,
        Err(err) => {
            warning!("Failed to remove cached token: {}", err);
            false
        }
    }
}

/// Steady-ticking spinner; call `finish_and_clear` before printing results.
fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// `m:ss`
fn format_duration(duration_ms: u64) -> String {
    let secs = duration_ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
