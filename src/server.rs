use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use reqwest::{Client, Url};
use tokio::{net::TcpListener, sync::Mutex, time::Instant};

use crate::{
    api,
    config::Config,
    error::{Error, Result},
    store::KeyValueStore,
    types::Token,
};

/// State shared between the callback handler and the command waiting for it.
///
/// Clones share the recorded outcome, so the copy handed to the server and
/// the copy the command waits on see the same result.
pub struct CallbackState<S> {
    /// Token endpoint and redirect URI used for the exchange.
    pub config: Arc<Config>,
    /// Client for the token POST.
    pub http: Client,
    /// Holds the verifier written by `begin_authorization`.
    pub store: S,
    outcome: Arc<Mutex<Option<Result<Token>>>>,
}

impl<S: Clone> Clone for CallbackState<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            http: self.http.clone(),
            store: self.store.clone(),
            outcome: Arc::clone(&self.outcome),
        }
    }
}

impl<S: KeyValueStore> CallbackState<S> {
    /// Creates the state with no outcome recorded yet.
    pub fn new(config: Arc<Config>, http: Client, store: S) -> Self {
        Self {
            config,
            http,
            store,
            outcome: Arc::new(Mutex::new(None)),
        }
    }

    /// Records the result of the first completed callback. Later callbacks,
    /// e.g. a browser reload of the redirect page, do not overwrite it.
    pub async fn record(&self, outcome: Result<Token>) {
        let mut slot = self.outcome.lock().await;
        if slot.is_none() {
            *slot = Some(outcome);
        }
    }

    /// Polls for the callback result until `max_wait` has elapsed.
    ///
    /// # Returns
    ///
    /// The token of the first callback, or the error it failed with.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if no callback completed within `max_wait`
    /// - [`Error::AuthorizationDenied`] if the user declined access
    /// - any error of the token exchange the callback ran
    ///
    /// # Example
    ///
    /// ```
    /// let token = state.wait_for_token(config.auth_timeout).await?;
    /// ```
    pub async fn wait_for_token(&self, max_wait: Duration) -> Result<Token> {
        let start = Instant::now();

        while start.elapsed() < max_wait {
            if let Some(outcome) = self.outcome.lock().await.take() {
                return outcome;
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }

        Err(Error::Timeout(max_wait))
    }
}

/// Path of the health endpoint; not available as a callback path.
pub const HEALTH_PATH: &str = "/health";

/// Path component of the redirect URI, which is where the callback is served.
///
/// # Errors
///
/// - [`Error::InvalidUrl`] if `redirect_uri` does not parse
/// - [`Error::InvalidConfig`] if the path is [`HEALTH_PATH`]
///
/// # Example
///
/// ```
/// assert_eq!(callback_path("http://localhost:5173/callback")?, "/callback");
/// ```
pub fn callback_path(redirect_uri: &str) -> Result<String> {
    let url =
        Url::parse(redirect_uri).map_err(|e| Error::InvalidUrl(format!("{redirect_uri}: {e}")))?;

    if url.path() == HEALTH_PATH {
        return Err(Error::InvalidConfig {
            key: "SPOTIFY_API_REDIRECT_URI",
            value: redirect_uri.to_string(),
            reason: "path is reserved for the health endpoint",
        });
    }

    Ok(url.path().to_string())
}

/// Builds the callback server's routes: [`HEALTH_PATH`] and the path of the
/// configured redirect URI.
///
/// # Arguments
///
/// * `state` - Shared with the callback handler through an `Extension` layer
///
/// # Errors
///
/// Fails like [`callback_path`] when the redirect URI cannot be served.
pub fn router<S>(state: CallbackState<S>) -> Result<Router>
where
    S: KeyValueStore + Clone + 'static,
{
    let path = callback_path(&state.config.redirect_uri)?;
    Ok(Router::new()
        .route(HEALTH_PATH, get(api::health))
        .route(&path, get(api::callback::<S>).layer(Extension(state))))
}

/// Binds the callback server's listener.
///
/// Bind before sending the user to the authorization server, so a port that
/// is already taken is reported before the browser opens.
///
/// # Errors
///
/// - [`Error::InvalidUrl`] if `addr` is not a `host:port` socket address
/// - [`Error::Io`] if the address cannot be bound
pub async fn bind(addr: &str) -> Result<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::InvalidUrl(format!("server address {addr}: {e}")))?;
    Ok(TcpListener::bind(&addr).await?)
}

/// Serves the callback routes on `listener` until the task is dropped.
///
/// # Errors
///
/// Returns an error if the routes cannot be built (see [`router`]) or the
/// server fails while accepting connections.
pub async fn start_api_server<S>(listener: TcpListener, state: CallbackState<S>) -> Result<()>
where
    S: KeyValueStore + Clone + 'static,
{
    let app = router(state)?;
    axum::serve(listener, app).await?;
    Ok(())
}
