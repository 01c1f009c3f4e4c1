use tabled::Table;

use crate::{
    config::Config,
    error, info,
    spotify::{SpotifyClient, TopQuery},
    stats::{self, AverageBasis},
    types::ArtistCountRow,
    warning,
};

use super::{forget_if_rejected, load_token, spinner};

/// Fetches profile, top artists and top tracks concurrently and prints the
/// popularity averages and the per-artist track histogram.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `query` - Page size and time range for both top-items reads
/// * `basis` - What the averages are divided by
/// * `json` - Print the [`stats::AggregateResult`] as JSON instead of text
pub async fn stats(config: Config, query: TopQuery, basis: AverageBasis, json: bool) {
    let client = match SpotifyClient::new(&config) {
        Ok(c) => c,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };
    let token_mgr = load_token().await;

    let pb = spinner("Fetching profile, top artists and top tracks...");
    let result = client.dashboard(token_mgr.access_token(), &query).await;
    pb.finish_and_clear();

    let dashboard = match result {
        Ok(d) => d,
        Err(e) => {
            forget_if_rejected(token_mgr, &e).await;
            error!("{}", e)
        }
    };

    let summary = match stats::aggregate(&dashboard.artists, &dashboard.tracks, basis) {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize summary: {}", e),
        }
        return;
    }

    if basis == AverageBasis::PageLimit {
        for (kind, returned, limit) in [
            ("artists", dashboard.artists.items.len(), dashboard.artists.limit),
            ("tracks", dashboard.tracks.items.len(), dashboard.tracks.limit),
        ] {
            if returned < limit as usize {
                warning!(
                    "Only {} of {} top {} returned; the average is divided by {}. Use --by-item-count to divide by {}.",
                    returned,
                    limit,
                    kind,
                    limit,
                    returned
                );
            }
        }
    }

    let name = dashboard
        .profile
        .display_name
        .as_deref()
        .unwrap_or(&dashboard.profile.id);
    info!("Top items for {}", name);
    info!(
        "Average artist popularity: {:.1}",
        summary.average_artist_popularity
    );
    info!(
        "Average track popularity: {:.1}",
        summary.average_track_popularity
    );

    let rows: Vec<ArtistCountRow> = summary
        .ranked_artist_counts()
        .into_iter()
        .map(|(artist, tracks)| ArtistCountRow {
            artist: artist.to_string(),
            tracks,
        })
        .collect();
    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
}
