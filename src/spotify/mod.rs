//! # Spotify Integration Module
//!
//! Talks to the two Spotify services sportop needs:
//!
//! ```text
//! accounts.spotify.com            api.spotify.com/v1
//!   GET  /authorize   (browser)     GET /me
//!   POST /api/token   (auth)        GET /me/top/artists
//!                                   GET /me/top/tracks   (client)
//! ```
//!
//! [`auth`] implements the OAuth 2.0 Authorization Code flow with PKCE:
//! the verifier is generated and persisted by [`auth::begin_authorization`],
//! the user approves the request in the browser, and
//! [`auth::exchange_code_for_token`] redeems the returned code together with
//! the persisted verifier.
//!
//! [`client`] reads resources with the resulting bearer token. The three
//! reads are independent and [`client::SpotifyClient::dashboard`] issues them
//! concurrently.
//!
//! Every request runs under the configured HTTP timeout. Token refresh is not
//! handled: a rejected token surfaces as [`crate::Error::Unauthorized`].

use reqwest::Client;

use crate::{config::Config, error::Result};

pub mod auth;
pub mod client;

pub use client::{Dashboard, Endpoint, SpotifyClient, TimeRange, TopQuery};

/// HTTP client shared by the token exchange and the resource reads.
pub fn http_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
