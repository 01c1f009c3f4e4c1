//! PKCE (RFC 7636) code verifier and S256 code challenge.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{CryptoRng, Rng};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Shortest verifier RFC 7636 accepts.
pub const MIN_VERIFIER_LENGTH: usize = 43;
/// Longest verifier RFC 7636 accepts.
pub const MAX_VERIFIER_LENGTH: usize = 128;
/// Length used when nothing else is configured.
pub const DEFAULT_VERIFIER_LENGTH: usize = 128;

/// Unreserved characters allowed in a verifier: `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
pub const UNRESERVED_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Generates a verifier of exactly `length` characters using the thread-local
/// CSPRNG.
///
/// Every character is drawn uniformly from [`UNRESERVED_CHARSET`].
///
/// # Errors
///
/// Returns [`Error::InvalidVerifierLength`] if `length` is outside
/// [`MIN_VERIFIER_LENGTH`]..=[`MAX_VERIFIER_LENGTH`].
///
/// # Example
///
/// ```
/// let verifier = generate_code_verifier(64)?;
/// assert_eq!(verifier.len(), 64);
/// ```
pub fn generate_code_verifier(length: usize) -> Result<String> {
    generate_code_verifier_with(&mut rand::rng(), length)
}

/// Same as [`generate_code_verifier`] with an explicit generator. The
/// `CryptoRng` bound keeps predictable generators out of this path.
pub fn generate_code_verifier_with<R: Rng + CryptoRng>(rng: &mut R, length: usize) -> Result<String> {
    if !(MIN_VERIFIER_LENGTH..=MAX_VERIFIER_LENGTH).contains(&length) {
        return Err(Error::InvalidVerifierLength(length));
    }

    Ok((0..length)
        .map(|_| char::from(UNRESERVED_CHARSET[rng.random_range(0..UNRESERVED_CHARSET.len())]))
        .collect())
}

/// Derives the S256 challenge: base64url(SHA-256(verifier)) without padding.
///
/// The result is always 43 characters long.
///
/// # Example
///
/// ```
/// assert_eq!(
///     generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
///     "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
/// );
/// ```
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// A verifier and the challenge derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    /// Generates a fresh verifier and its challenge.
    ///
    /// # Errors
    ///
    /// Same as [`generate_code_verifier`].
    pub fn generate(length: usize) -> Result<Self> {
        let verifier = generate_code_verifier(length)?;
        Ok(Self::from_verifier(verifier))
    }

    /// Pairs an existing verifier with its challenge.
    pub fn from_verifier(verifier: String) -> Self {
        let challenge = generate_code_challenge(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}
