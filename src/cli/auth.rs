use std::sync::Arc;

use crate::{
    config::Config,
    error, info,
    management::TokenManager,
    server::{self, CallbackState},
    spotify::{self, auth::begin_authorization},
    store::FileStore,
    success, warning,
};

/// Runs the complete PKCE flow.
///
/// 1. Binds the local callback server on `SERVER_ADDRESS`
/// 2. Generates and persists the verifier, builds the authorization URL
/// 3. Opens the URL in the default browser (or prints it)
/// 4. Waits for the callback, which exchanges the code for a token
/// 5. Caches the token for the other commands
pub async fn auth(config: Config) {
    let config = Arc::new(config);

    let http = match spotify::http_client(&config) {
        Ok(c) => c,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    if let Err(e) = server::callback_path(&config.redirect_uri) {
        error!("Cannot serve the redirect URI: {}", e);
    }

    let listener = match server::bind(&config.server_addr).await {
        Ok(l) => l,
        Err(e) => error!(
            "Cannot listen on {} for the callback: {}",
            config.server_addr, e
        ),
    };

    let store = FileStore::in_data_dir();
    let auth_url = match begin_authorization(&config, &store).await {
        Ok(url) => url,
        Err(e) => error!("Cannot start authorization: {}", e),
    };

    let state = CallbackState::new(Arc::clone(&config), http, store);
    let server_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }
    info!("Waiting for authorization...");

    match state.wait_for_token(config.auth_timeout).await {
        Ok(token) => {
            let token_manager = TokenManager::new(token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        Err(e) => error!("Authentication failed: {}", e),
    }
}
