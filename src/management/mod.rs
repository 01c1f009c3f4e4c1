//! # Management Module
//!
//! Local state kept between CLI invocations.
//!
//! - [`TokenManager`] caches the access token obtained by `sportop auth` in
//!   the local data directory, so `profile`, `top` and `stats` can run
//!   without authorizing again.
//!
//! The PKCE verifier is not kept here; it lives in [`crate::store`] because
//! the callback handler needs it, not the commands.

mod auth;

pub use auth::TokenManager;
