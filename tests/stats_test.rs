use sportop::{
    Error,
    stats::{AverageBasis, aggregate, artist_track_counts},
    types::{Artist, ArtistsPage, Track, TrackAlbum, TrackArtist, TracksPage},
};

// Helper function to create a test artist
fn artist(name: &str, popularity: u32) -> Artist {
    Artist {
        id: None,
        name: name.to_string(),
        popularity,
        images: Vec::new(),
        genres: Vec::new(),
    }
}

// Helper function to create a test track credited to `artists`
fn track(name: &str, popularity: u32, artists: &[&str]) -> Track {
    Track {
        id: None,
        name: name.to_string(),
        popularity,
        duration_ms: 180_000,
        album: TrackAlbum::default(),
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                id: None,
                name: a.to_string(),
            })
            .collect(),
    }
}

fn artists_page(items: Vec<Artist>, limit: u32) -> ArtistsPage {
    ArtistsPage {
        items,
        limit,
        offset: None,
        total: None,
        next: None,
    }
}

fn tracks_page(items: Vec<Track>, limit: u32) -> TracksPage {
    TracksPage {
        items,
        limit,
        offset: None,
        total: None,
        next: None,
    }
}

#[test]
fn test_average_artist_popularity() {
    let artists = artists_page(vec![artist("A", 80), artist("B", 60)], 2);
    let tracks = tracks_page(vec![track("x", 40, &["A"])], 1);

    let result = aggregate(&artists, &tracks, AverageBasis::PageLimit).unwrap();
    assert_eq!(result.average_artist_popularity, 70.0);
    assert_eq!(result.average_track_popularity, 40.0);
}

#[test]
fn test_artist_track_counts() {
    let tracks = tracks_page(
        vec![track("one", 10, &["A"]), track("two", 20, &["A", "B"])],
        2,
    );

    let counts = artist_track_counts(&tracks);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["A"], 2);
    assert_eq!(counts["B"], 1);
}

#[test]
fn test_zero_limit_is_an_error() {
    let artists = artists_page(vec![artist("A", 80)], 0);
    let tracks = tracks_page(vec![track("x", 40, &["A"])], 1);

    let err = aggregate(&artists, &tracks, AverageBasis::PageLimit).unwrap_err();
    assert!(matches!(err, Error::DivisionByZero { field: "artist popularity" }));

    let artists = artists_page(vec![artist("A", 80)], 1);
    let tracks = tracks_page(Vec::new(), 0);
    let err = aggregate(&artists, &tracks, AverageBasis::PageLimit).unwrap_err();
    assert!(matches!(err, Error::DivisionByZero { field: "track popularity" }));
}

#[test]
fn test_short_page_by_limit_and_by_item_count() {
    // Page size 20 but only two artists returned
    let artists = artists_page(vec![artist("A", 80), artist("B", 60)], 20);
    let tracks = tracks_page(vec![track("x", 50, &["A"])], 20);

    let by_limit = aggregate(&artists, &tracks, AverageBasis::PageLimit).unwrap();
    assert_eq!(by_limit.average_artist_popularity, 7.0);
    assert_eq!(by_limit.average_track_popularity, 2.5);

    let by_count = aggregate(&artists, &tracks, AverageBasis::ItemCount).unwrap();
    assert_eq!(by_count.average_artist_popularity, 70.0);
    assert_eq!(by_count.average_track_popularity, 50.0);
}

#[test]
fn test_empty_pages_by_item_count() {
    let artists = artists_page(Vec::new(), 20);
    let tracks = tracks_page(Vec::new(), 20);

    // Nothing to divide by
    assert!(matches!(
        aggregate(&artists, &tracks, AverageBasis::ItemCount),
        Err(Error::DivisionByZero { .. })
    ));

    // The page size is still a valid divisor
    let result = aggregate(&artists, &tracks, AverageBasis::PageLimit).unwrap();
    assert_eq!(result.average_artist_popularity, 0.0);
    assert!(result.artist_track_counts.is_empty());
}

#[test]
fn test_ranked_artist_counts() {
    let artists = artists_page(vec![artist("A", 50)], 1);
    let tracks = tracks_page(
        vec![
            track("1", 10, &["Zed"]),
            track("2", 10, &["Abe", "Zed"]),
            track("3", 10, &["Mia"]),
            track("4", 10, &["Abe"]),
            track("5", 10, &["Zed"]),
        ],
        5,
    );

    let result = aggregate(&artists, &tracks, AverageBasis::PageLimit).unwrap();
    assert_eq!(
        result.ranked_artist_counts(),
        vec![("Zed", 3), ("Abe", 2), ("Mia", 1)]
    );
}
