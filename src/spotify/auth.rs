use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config::{Config, SCOPE},
    error::{Error, Result},
    pkce::PkcePair,
    store::{KeyValueStore, VERIFIER_KEY},
    types::{Token, TokenResponse},
};

/// Builds the authorization request URL for the given challenge.
///
/// The query carries `client_id`, `response_type=code`, `redirect_uri`,
/// `scope`, `code_challenge_method=S256` and `code_challenge`, percent-encoded.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if `config.auth_url` is not a valid URL.
pub fn authorization_url(config: &Config, code_challenge: &str) -> Result<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", SCOPE),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
        ],
    )
    .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.auth_url, e)))
}

/// Starts the PKCE flow.
///
/// Generates a fresh verifier, persists it under [`VERIFIER_KEY`] so the
/// token exchange can pick it up after the redirect, and returns the URL the
/// user agent has to be sent to. Any verifier left over from an earlier,
/// unfinished flow is overwritten.
///
/// # Arguments
///
/// * `config` - Client id, redirect URI and verifier length
/// * `store` - Receives the verifier under [`VERIFIER_KEY`]
///
/// # Errors
///
/// - [`Error::InvalidVerifierLength`] if the configured length is out of range
/// - [`Error::InvalidUrl`] if the authorization URL cannot be built
/// - any error of the store while writing the verifier
///
/// # Example
///
/// ```
/// let url = begin_authorization(&config, &FileStore::in_data_dir()).await?;
/// webbrowser::open(url.as_str())?;
/// ```
pub async fn begin_authorization<S: KeyValueStore>(config: &Config, store: &S) -> Result<Url> {
    let pkce = PkcePair::generate(config.verifier_length)?;
    let url = authorization_url(config, &pkce.challenge)?;

    // must be stored before the user agent leaves
    store.set(VERIFIER_KEY, &pkce.verifier).await?;

    Ok(url)
}

/// Redeems an authorization code for an access token.
///
/// Sends `client_id`, `grant_type=authorization_code`, `code`, `redirect_uri`
/// and the persisted `code_verifier` as a form-encoded POST to the token
/// endpoint. Never retry this with the same code: the server only accepts
/// it once.
///
/// The verifier is taken out of the store before the request is sent, so
/// when two callbacks race only one of them reaches the token endpoint. If
/// the exchange fails the verifier is put back and a later callback of the
/// same flow can still use it.
///
/// # Arguments
///
/// * `http` - Client used for the POST
/// * `config` - Token endpoint, client id and redirect URI
/// * `store` - Store holding the verifier under [`VERIFIER_KEY`]
/// * `code` - The `code` query parameter of the callback
///
/// # Returns
///
/// The access token together with the time it was obtained.
///
/// # Errors
///
/// - [`Error::MissingVerifier`] if no verifier was persisted, or another
///   exchange already took it
/// - [`Error::TokenExchange`] on a non-2xx answer or a body without `access_token`
/// - [`Error::Timeout`] if the request exceeds the configured HTTP timeout
///
/// # Example
///
/// ```
/// let token = exchange_code_for_token(&http, &config, &store, &params.code).await?;
/// TokenManager::new(token).persist().await?;
/// ```
pub async fn exchange_code_for_token<S: KeyValueStore>(
    http: &Client,
    config: &Config,
    store: &S,
    code: &str,
) -> Result<Token> {
    let verifier = store
        .take(VERIFIER_KEY)
        .await?
        .ok_or(Error::MissingVerifier)?;

    match redeem(http, config, code, &verifier).await {
        Ok(token) => Ok(token),
        Err(err) => {
            store.set(VERIFIER_KEY, &verifier).await?;
            Err(err)
        }
    }
}

async fn redeem(http: &Client, config: &Config, code: &str, verifier: &str) -> Result<Token> {
    let res = http
        .post(&config.token_url)
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await
        .map_err(|e| Error::from_transport(e, config.http_timeout))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| Error::from_transport(e, config.http_timeout))?;

    if !status.is_success() {
        return Err(Error::TokenExchange {
            status: status.as_u16(),
            body,
        });
    }

    let parsed = match serde_json::from_str::<TokenResponse>(&body) {
        Ok(parsed) if !parsed.access_token.is_empty() => parsed,
        _ => {
            return Err(Error::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }
    };

    Ok(Token {
        access_token: parsed.access_token,
        token_type: parsed.token_type.unwrap_or_else(|| "Bearer".to_string()),
        scope: parsed.scope.unwrap_or_default(),
        expires_in: parsed.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
