use tabled::Table;

use crate::{
    config::Config,
    error,
    spotify::{SpotifyClient, TopQuery},
    types::{ArtistTableRow, TrackTableRow},
    warning,
};

use super::{forget_if_rejected, format_duration, load_token, spinner};

/// Prints the user's top artists as a table: rank, name, popularity and up
/// to three genres.
pub async fn top_artists(config: Config, query: TopQuery) {
    let client = match SpotifyClient::new(&config) {
        Ok(c) => c,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };
    let token_mgr = load_token().await;

    let pb = spinner("Fetching top artists...");
    let result = client.top_artists(token_mgr.access_token(), &query).await;
    pb.finish_and_clear();

    let page = match result {
        Ok(p) => p,
        Err(e) => {
            forget_if_rejected(token_mgr, &e).await;
            error!("{}", e)
        }
    };
    if page.items.is_empty() {
        warning!("No top artists yet.");
        return;
    }

    let rows: Vec<ArtistTableRow> = page
        .items
        .into_iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name,
            popularity: a.popularity,
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Prints the user's top tracks as a table with credited artists and
/// duration.
pub async fn top_tracks(config: Config, query: TopQuery) {
    let client = match SpotifyClient::new(&config) {
        Ok(c) => c,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };
    let token_mgr = load_token().await;

    let pb = spinner("Fetching top tracks...");
    let result = client.top_tracks(token_mgr.access_token(), &query).await;
    pb.finish_and_clear();

    let page = match result {
        Ok(p) => p,
        Err(e) => {
            forget_if_rejected(token_mgr, &e).await;
            error!("{}", e)
        }
    };
    if page.items.is_empty() {
        warning!("No top tracks yet.");
        return;
    }

    let rows: Vec<TrackTableRow> = page
        .items
        .into_iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            artists: t
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            name: t.name,
            popularity: t.popularity,
            duration: format_duration(t.duration_ms),
        })
        .collect();

    println!("{}", Table::new(rows));
}
