//! Configuration management for sportop.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults for everything except the client id

use std::{env, path::PathBuf, time::Duration};

use crate::{
    error::{Error, Result},
    pkce,
};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5173/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5173";

/// Permissions requested from the user; fixed for this application.
pub const SCOPE: &str = "user-read-private user-read-email user-top-read";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Loads environment variables from `sportop/.env` in the local data directory.
///
/// The directory is created if needed. A missing `.env` file is fine since
/// every value can also come from the process environment.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/sportop/.env`
/// - macOS: `~/Library/Application Support/sportop/.env`
/// - Windows: `%LOCALAPPDATA%/sportop/.env`
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Returns the location of the `.env` file read by [`load_env`].
///
/// Falls back to the current directory when the platform has no local data
/// directory.
///
/// # Example
///
/// ```
/// println!("Configure sportop in {}", config::env_path().display());
/// ```
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sportop/.env");
    path
}

/// Runtime settings for the authorization flow and the API client.
///
/// Build it with [`Config::from_env`] in the binary, or with [`Config::new`]
/// and field assignments when embedding or testing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client id of the app registered in the Spotify developer dashboard.
    pub client_id: String,
    /// Where Spotify sends the user back to. Must match the registered URI.
    pub redirect_uri: String,
    /// Authorization endpoint the user agent is sent to.
    pub auth_url: String,
    /// Token endpoint the authorization code is redeemed at.
    pub token_url: String,
    /// Base URL of the Web API, without trailing slash.
    pub api_url: String,
    /// `host:port` the local callback server listens on.
    pub server_addr: String,
    /// Upper bound for every single HTTP request.
    pub http_timeout: Duration,
    /// How long `sportop auth` waits for the browser to come back.
    pub auth_timeout: Duration,
    /// Length of generated PKCE verifiers, 43..=128.
    pub verifier_length: usize,
    /// Extra attempts for a GET answered with 502/503.
    pub max_retries: u32,
    /// Pause between those attempts.
    pub retry_delay: Duration,
}

impl Config {
    /// Settings with defaults for everything but the client id.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
            verifier_length: pkce::DEFAULT_VERIFIER_LENGTH,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// Call [`load_env`] first so values from the `.env` file are visible.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    ///
    /// # Example
    ///
    /// ```
    /// config::load_env().await?;
    /// let config = Config::from_env()?;
    /// println!("Callback server on {}", config.server_addr);
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty or whitespace-only values count as unset and keep the default.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the raw value of a variable, `None` if unset
    ///
    /// # Errors
    ///
    /// - [`Error::MissingConfig`] if `SPOTIFY_API_AUTH_CLIENT_ID` is unset or empty
    /// - [`Error::InvalidConfig`] if a numeric variable does not parse, or a
    ///   timeout is zero
    /// - [`Error::InvalidVerifierLength`] if `SPORTOP_VERIFIER_LENGTH` is
    ///   outside 43..=128
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = var("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok_or(Error::MissingConfig("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let mut config = Self::new(client_id);
        if let Some(v) = var("SPOTIFY_API_REDIRECT_URI") {
            config.redirect_uri = v;
        }
        if let Some(v) = var("SPOTIFY_API_AUTH_URL") {
            config.auth_url = v;
        }
        if let Some(v) = var("SPOTIFY_API_TOKEN_URL") {
            config.token_url = v;
        }
        if let Some(v) = var("SPOTIFY_API_URL") {
            config.api_url = v;
        }
        if let Some(v) = var("SERVER_ADDRESS") {
            config.server_addr = v;
        }
        if let Some(secs) = timeout_secs("SPORTOP_HTTP_TIMEOUT_SECS", var("SPORTOP_HTTP_TIMEOUT_SECS"))? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = timeout_secs("SPORTOP_AUTH_TIMEOUT_SECS", var("SPORTOP_AUTH_TIMEOUT_SECS"))? {
            config.auth_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = var("SPORTOP_VERIFIER_LENGTH") {
            let len: usize = raw.trim().parse().map_err(|_| Error::InvalidConfig {
                key: "SPORTOP_VERIFIER_LENGTH",
                value: raw.clone(),
                reason: "not a number",
            })?;
            if !(pkce::MIN_VERIFIER_LENGTH..=pkce::MAX_VERIFIER_LENGTH).contains(&len) {
                return Err(Error::InvalidVerifierLength(len));
            }
            config.verifier_length = len;
        }

        Ok(config)
    }
}

/// Parses a timeout in whole seconds; zero would fail every request at once.
fn timeout_secs(key: &'static str, raw: Option<String>) -> Result<Option<u64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(Error::InvalidConfig {
            key,
            value: raw,
            reason: "must be greater than zero",
        }),
        Ok(secs) => Ok(Some(secs)),
        Err(_) => Err(Error::InvalidConfig {
            key,
            value: raw,
            reason: "not a number of seconds",
        }),
    }
}
