use std::{collections::HashMap, time::Duration};

use sportop::{Error, config::Config};

// Helper function to build a config from a fixed set of variables
fn config_from(vars: &[(&str, &str)]) -> Result<Config, Error> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_with_only_client_id() {
    let config = config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "abc")]).unwrap();

    assert_eq!(config.client_id, "abc");
    assert_eq!(config.redirect_uri, "http://localhost:5173/callback");
    assert_eq!(config.token_url, "https://accounts.spotify.com/api/token");
    assert_eq!(config.http_timeout, Duration::from_secs(10));
    assert_eq!(config.verifier_length, 128);
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
        ("SERVER_ADDRESS", "127.0.0.1:8888"),
        ("SPORTOP_HTTP_TIMEOUT_SECS", "30"),
        ("SPORTOP_AUTH_TIMEOUT_SECS", " 60 "),
        ("SPORTOP_VERIFIER_LENGTH", "43"),
        // Blank values keep the default
        ("SPOTIFY_API_URL", "  "),
    ])
    .unwrap();

    assert_eq!(config.server_addr, "127.0.0.1:8888");
    assert_eq!(config.http_timeout, Duration::from_secs(30));
    assert_eq!(config.auth_timeout, Duration::from_secs(60));
    assert_eq!(config.verifier_length, 43);
    assert_eq!(config.api_url, "https://api.spotify.com/v1");
}

#[test]
fn test_missing_client_id() {
    assert!(matches!(
        config_from(&[]),
        Err(Error::MissingConfig("SPOTIFY_API_AUTH_CLIENT_ID"))
    ));
    assert!(matches!(
        config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "")]),
        Err(Error::MissingConfig(_))
    ));
}

#[test]
fn test_verifier_length_out_of_range() {
    assert!(matches!(
        config_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
            ("SPORTOP_VERIFIER_LENGTH", "42"),
        ]),
        Err(Error::InvalidVerifierLength(42))
    ));
    assert!(matches!(
        config_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
            ("SPORTOP_VERIFIER_LENGTH", "129"),
        ]),
        Err(Error::InvalidVerifierLength(129))
    ));
}

#[test]
fn test_verifier_length_not_a_number() {
    match config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
        ("SPORTOP_VERIFIER_LENGTH", "4x"),
    ]) {
        Err(Error::InvalidConfig { key, value, .. }) => {
            assert_eq!(key, "SPORTOP_VERIFIER_LENGTH");
            assert_eq!(value, "4x");
        }
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn test_zero_timeout_is_rejected() {
    assert!(matches!(
        config_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
            ("SPORTOP_HTTP_TIMEOUT_SECS", "0"),
        ]),
        Err(Error::InvalidConfig {
            key: "SPORTOP_HTTP_TIMEOUT_SECS",
            ..
        })
    ));
    assert!(matches!(
        config_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
            ("SPORTOP_AUTH_TIMEOUT_SECS", "0"),
        ]),
        Err(Error::InvalidConfig {
            key: "SPORTOP_AUTH_TIMEOUT_SECS",
            ..
        })
    ));
}

#[test]
fn test_timeout_not_a_number() {
    assert!(matches!(
        config_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
            ("SPORTOP_HTTP_TIMEOUT_SECS", "ten"),
        ]),
        Err(Error::InvalidConfig { .. })
    ));
}
