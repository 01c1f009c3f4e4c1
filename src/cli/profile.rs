use colored::Colorize;

use crate::{config::Config, error, spotify::SpotifyClient};

use super::{forget_if_rejected, load_token, spinner};

/// Prints the profile of the authorized user.
pub async fn profile(config: Config) {
    let client = match SpotifyClient::new(&config) {
        Ok(c) => c,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };
    let token_mgr = load_token().await;

    let pb = spinner("Fetching profile...");
    let result = client.profile(token_mgr.access_token()).await;
    pb.finish_and_clear();

    let profile = match result {
        Ok(p) => p,
        Err(e) => {
            forget_if_rejected(token_mgr, &e).await;
            error!("{}", e)
        }
    };

    let rows = [
        ("Display name", profile.display_name.clone().unwrap_or_default()),
        ("ID", profile.id.clone()),
        ("Email", profile.email.clone().unwrap_or_default()),
        ("Spotify URI", profile.uri.clone()),
        (
            "Link",
            profile.external_urls.spotify.clone().unwrap_or_default(),
        ),
        ("Profile image", profile.avatar().map(|i| i.url.clone()).unwrap_or_default()),
        ("API href", profile.href.clone()),
    ];
    for (label, value) in rows {
        println!("{:>14}  {}", label.bold(), value);
    }
}
