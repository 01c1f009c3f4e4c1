#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use serde_json::{Value, json};
use sportop::config::Config;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Config pointing every Spotify URL at the fake server.
pub fn test_config(base: &str) -> Config {
    let mut config = Config::new("client-123");
    config.auth_url = format!("{base}/authorize");
    config.token_url = format!("{base}/api/token");
    config.api_url = format!("{base}/v1");
    config.redirect_uri = "http://127.0.0.1:5173/callback".to_string();
    config.http_timeout = Duration::from_millis(500);
    config.retry_delay = Duration::from_millis(10);
    config
}

pub fn profile_json() -> Value {
    json!({
        "display_name": "Ada",
        "id": "ada-1815",
        "email": "ada@example.com",
        "uri": "spotify:user:ada-1815",
        "href": "https://api.spotify.com/v1/users/ada-1815",
        "images": [{ "url": "https://i.scdn.co/image/ada", "height": 300, "width": 300 }],
        "external_urls": { "spotify": "https://open.spotify.com/user/ada-1815" },
        "followers": { "href": null, "total": 3 },
        "country": "GB"
    })
}

pub fn artists_json() -> Value {
    json!({
        "items": [
            { "id": "a1", "name": "Artist A", "popularity": 80, "genres": ["synthpop"], "images": [] },
            { "id": "a2", "name": "Artist B", "popularity": 60, "genres": [], "images": null }
        ],
        "limit": 2,
        "offset": 0,
        "total": 2,
        "next": null
    })
}

pub fn tracks_json() -> Value {
    json!({
        "items": [
            {
                "id": "t1",
                "name": "First",
                "popularity": 50,
                "duration_ms": 200000,
                "album": { "name": "One", "images": [] },
                "artists": [{ "id": "a1", "name": "Artist A" }]
            },
            {
                "id": "t2",
                "name": "Second",
                "popularity": 70,
                "duration_ms": 180000,
                "album": { "name": "Two", "images": [{ "url": "https://i.scdn.co/image/two" }] },
                "artists": [{ "id": "a1", "name": "Artist A" }, { "id": "a2", "name": "Artist B" }]
            }
        ],
        "limit": 2
    })
}
