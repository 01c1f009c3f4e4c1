//! # API Module
//!
//! HTTP endpoints served by the local callback server while `sportop auth`
//! is waiting for the user:
//!
//! - [`callback`] receives the redirect from Spotify's authorization server
//!   and exchanges the authorization code for an access token.
//! - [`health`] reports status and version.

mod callback;
mod health;

pub use callback::{CallbackParams, callback};
pub use health::health;
