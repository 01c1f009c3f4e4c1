use std::time::Duration;

use clap::ValueEnum;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config::Config,
    error::{Error, Result},
    types::{ArtistsPage, Profile, TracksPage},
};

/// Resource endpoints read with a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Profile,
    TopArtists,
    TopTracks,
}

impl Endpoint {
    /// Path relative to the API base URL, without leading slash.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Profile => "me",
            Endpoint::TopArtists => "me/top/artists",
            Endpoint::TopTracks => "me/top/tracks",
        }
    }
}

/// Period the top items are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    /// Roughly the last 4 weeks
    ShortTerm,
    /// Roughly the last 6 months
    MediumTerm,
    /// Roughly the last year
    LongTerm,
}

impl TimeRange {
    /// Value of the `time_range` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// Optional query parameters of the top-items endpoints. Unset values are
/// left to the server's defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopQuery {
    /// Page size, 1 to 50. Spotify defaults to 20.
    pub limit: Option<u32>,
    /// Spotify defaults to [`TimeRange::MediumTerm`].
    pub time_range: Option<TimeRange>,
}

impl TopQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(range) = self.time_range {
            params.push(("time_range", range.as_str().to_string()));
        }
        params
    }
}

/// Everything the summary view needs, fetched in one go.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub profile: Profile,
    pub artists: ArtistsPage,
    pub tracks: TracksPage,
}

/// Authenticated reader for the Spotify Web API.
///
/// The token is passed per call, so one client can serve several users.
/// Cloning is cheap; the underlying connection pool is shared.
///
/// # Example
///
/// ```
/// let client = SpotifyClient::new(&config)?;
/// let page = client.top_tracks(token_mgr.access_token(), &TopQuery::default()).await?;
/// println!("{} top tracks", page.items.len());
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl SpotifyClient {
    /// Builds a client for `config.api_url` with the configured timeout and
    /// retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: super::http_client(config)?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            timeout: config.http_timeout,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        })
    }

    /// Issues `GET <api_url>/<endpoint>` with `Authorization: Bearer <token>`
    /// and decodes the JSON body.
    ///
    /// 502 and 503 answers are retried up to `max_retries` times, waiting
    /// `retry_delay` in between.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token sent as bearer credential
    /// * `endpoint` - Resource to read
    /// * `query` - Query parameters, e.g. from [`TopQuery`]
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] on 401
    /// - [`Error::ResourceFetch`] on any other non-2xx status
    /// - [`Error::Timeout`] if a request exceeds the configured timeout
    /// - [`Error::Http`] if the connection fails or the body cannot be read
    ///   or decoded as `T`
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        token: &str,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.api_url, endpoint.path());
        let mut attempt = 0;

        loop {
            let response = self
                .http
                .get(&url)
                .query(query)
                .bearer_auth(token)
                .send()
                .await
                .map_err(|e| Error::from_transport(e, self.timeout))?;

            let status = response.status();
            if status.is_success() {
                return response
                    .json::<T>()
                    .await
                    .map_err(|e| Error::from_transport(e, self.timeout));
            }

            if status == StatusCode::UNAUTHORIZED {
                return Err(Error::Unauthorized);
            }

            let transient =
                status == StatusCode::BAD_GATEWAY || status == StatusCode::SERVICE_UNAVAILABLE;
            if transient && attempt < self.max_retries {
                attempt += 1;
                sleep(self.retry_delay).await;
                continue; // retry
            }

            let body = response
                .text()
                .await
                .map_err(|e| Error::from_transport(e, self.timeout))?;
            return Err(Error::ResourceFetch {
                status: status.as_u16(),
                body,
            });
        }
    }

    /// Reads the profile of the user the token belongs to (`GET /me`).
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::fetch_resource`].
    pub async fn profile(&self, token: &str) -> Result<Profile> {
        self.fetch_resource(token, Endpoint::Profile, &[]).await
    }

    /// Reads one page of the user's top artists.
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::fetch_resource`].
    pub async fn top_artists(&self, token: &str, query: &TopQuery) -> Result<ArtistsPage> {
        self.fetch_resource(token, Endpoint::TopArtists, &query.params())
            .await
    }

    /// Reads one page of the user's top tracks.
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::fetch_resource`].
    pub async fn top_tracks(&self, token: &str, query: &TopQuery) -> Result<TracksPage> {
        self.fetch_resource(token, Endpoint::TopTracks, &query.params())
            .await
    }

    /// Fetches profile, top artists and top tracks concurrently. The first
    /// failure wins and the other requests are dropped.
    pub async fn dashboard(&self, token: &str, query: &TopQuery) -> Result<Dashboard> {
        let (profile, artists, tracks) = tokio::try_join!(
            self.profile(token),
            self.top_artists(token, query),
            self.top_tracks(token, query),
        )?;

        Ok(Dashboard {
            profile,
            artists,
            tracks,
        })
    }
}
