use std::path::PathBuf;

use crate::{error::Result, types::Token};

/// Keeps the access token between CLI invocations so `auth` only has to run
/// once per session.
///
/// The token is stored as pretty-printed JSON, by default in
/// `sportop/cache/token.json` under the platform's local data directory.
/// Nothing refreshes it: once Spotify answers 401 the cache is cleared and
/// the user has to authorize again.
///
/// # Example
///
/// ```
/// let token_mgr = TokenManager::load().await?;
/// let profile = client.profile(token_mgr.access_token()).await?;
/// ```
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    /// Wraps a freshly obtained token, cached at the default location.
    pub fn new(token: Token) -> Self {
        Self::with_path(token, Self::token_path())
    }

    /// Wraps a token cached at `path` instead of the default location.
    ///
    /// # Arguments
    ///
    /// * `token` - Token to cache
    /// * `path` - JSON file the token is written to by [`TokenManager::persist`]
    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    /// Loads the cached token from the default location.
    ///
    /// # Errors
    ///
    /// Same as [`TokenManager::load_from`].
    pub async fn load() -> Result<Self> {
        Self::load_from(Self::token_path()).await
    }

    /// Loads a cached token from `path`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Io`] if the file does not exist or cannot be read,
    ///   which usually means `sportop auth` has not run yet
    /// - [`crate::Error::Decode`] if the file is not a valid token
    pub async fn load_from(path: PathBuf) -> Result<Self> {
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, path })
    }

    /// Writes the token to its cache file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be written.
    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Forgets the cached token, e.g. after the API rejected it.
    ///
    /// A cache file that is already gone counts as cleared.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file exists but cannot be removed.
    pub async fn clear(self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Bearer token for resource requests.
    pub fn access_token(&self) -> &str {
        &self.token.access_token
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sportop/cache/token.json");
        path
    }
}
