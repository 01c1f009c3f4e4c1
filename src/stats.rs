//! Summary statistics over the top-items pages.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::{Error, Result},
    types::{ArtistsPage, TopItemsPage, TracksPage},
};

/// What popularity averages are divided by.
///
/// Spotify's `limit` is the requested page size. When a user has fewer top
/// items than that, dividing by `limit` understates the average, so
/// `ItemCount` divides by the number of items actually returned instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AverageBasis {
    /// Divide by the page's `limit`.
    #[default]
    PageLimit,
    /// Divide by `items.len()`.
    ItemCount,
}

/// Summary printed by `sportop stats`, also serialized with `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub average_artist_popularity: f64,
    pub average_track_popularity: f64,
    /// Number of top tracks each artist is credited on.
    pub artist_track_counts: BTreeMap<String, u32>,
}

impl AggregateResult {
    /// Histogram entries, most credited first, ties by name.
    pub fn ranked_artist_counts(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .artist_track_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Computes the averages and the per-artist track histogram.
///
/// # Arguments
///
/// * `artists` - Top artists page; its popularities are averaged
/// * `tracks` - Top tracks page; averaged and counted per credited artist
/// * `basis` - What the averages are divided by
///
/// # Errors
///
/// Fails with [`Error::DivisionByZero`] instead of yielding `NaN` or
/// infinity when a divisor is zero.
///
/// # Example
///
/// ```
/// let dashboard = client.dashboard(token, &TopQuery::default()).await?;
/// let summary = aggregate(&dashboard.artists, &dashboard.tracks, AverageBasis::ItemCount)?;
/// println!("{:.1}", summary.average_track_popularity);
/// ```
pub fn aggregate(
    artists: &ArtistsPage,
    tracks: &TracksPage,
    basis: AverageBasis,
) -> Result<AggregateResult> {
    let average_artist_popularity = average_popularity(
        artists,
        |a| a.popularity,
        basis,
        "artist popularity",
    )?;
    let average_track_popularity =
        average_popularity(tracks, |t| t.popularity, basis, "track popularity")?;

    Ok(AggregateResult {
        average_artist_popularity,
        average_track_popularity,
        artist_track_counts: artist_track_counts(tracks),
    })
}

fn average_popularity<T>(
    page: &TopItemsPage<T>,
    popularity: impl Fn(&T) -> u32,
    basis: AverageBasis,
    field: &'static str,
) -> Result<f64> {
    let divisor = match basis {
        AverageBasis::PageLimit => page.limit as usize,
        AverageBasis::ItemCount => page.items.len(),
    };
    if divisor == 0 {
        return Err(Error::DivisionByZero { field });
    }

    let sum: u64 = page.items.iter().map(|item| popularity(item) as u64).sum();
    Ok(sum as f64 / divisor as f64)
}

/// Every credited artist of every track counts once per track.
pub fn artist_track_counts(tracks: &TracksPage) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for track in &tracks.items {
        for artist in &track.artists {
            *counts.entry(artist.name.clone()).or_insert(0) += 1;
        }
    }
    counts
}
