//! Data structures exchanged with Spotify and printed by the CLI.
//!
//! The response records are lenient: optional fields default when missing,
//! and lists Spotify sends as `null` deserialize as empty. Only the fields
//! sportop reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Access token as persisted between CLI invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer credential for resource requests.
    pub access_token: String,
    /// Always `Bearer` for Spotify.
    pub token_type: String,
    /// Space-separated scopes the user granted.
    pub scope: String,
    /// Lifetime in seconds, counted from `obtained_at`.
    pub expires_in: u64,
    /// Unix timestamp (seconds) of the exchange.
    pub obtained_at: u64,
}

/// Body returned by the token endpoint. Only `access_token` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Cover or profile picture. Spotify lists the largest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    /// Link to the object in the Spotify web player.
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Account of the authorized user, as returned by `GET /me`.
///
/// `email` is only present with the `user-read-email` scope, and
/// `display_name` is unset for accounts that never chose one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Spotify user id.
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// `spotify:user:<id>`
    pub uri: String,
    /// Web API endpoint of this user.
    pub href: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl Profile {
    /// Largest profile picture, if the user has one.
    pub fn avatar(&self) -> Option<&Image> {
        self.images.first()
    }
}

/// One page of `GET /me/top/{type}`.
///
/// `limit` is the page size the server applied, not the number of items
/// returned; a user with fewer top items than the page size gets a short page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItemsPage<T> {
    pub items: Vec<T>,
    /// Page size the server applied.
    pub limit: u32,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Entry of the top artists page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// 0 to 100, computed by Spotify from recent play counts.
    #[serde(default)]
    pub popularity: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,
}

/// Artist credited on a track; a simplified object without popularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
}

/// Entry of the top tracks page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub album: TrackAlbum,
    /// Credited artists in billing order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artists: Vec<TrackArtist>,
}

pub type ArtistsPage = TopItemsPage<Artist>;
pub type TracksPage = TopItemsPage<Track>;

/// Row of the `top artists` table.
#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub popularity: u32,
    pub genres: String,
}

/// Row of the `top tracks` table.
#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub popularity: u32,
    pub duration: String,
}

/// Row of the per-artist histogram printed by `stats`.
#[derive(Tabled)]
pub struct ArtistCountRow {
    pub artist: String,
    pub tracks: u32,
}

/// Spotify sends `null` for some list fields; treat that like an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
