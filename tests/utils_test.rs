use spotterm::types::{Artist, Credential, Playlist, TokenResponse, TracksRef};
use spotterm::utils::*;

// Helper function to create a test playlist
fn create_test_playlist(id: &str, uri: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: "Test Playlist".to_string(),
        uri: uri.to_string(),
        tracks: TracksRef {
            href: format!("https://api.spotify.com/v1/playlists/{}/tracks", id),
            total: Some(12),
        },
    }
}

// Helper function to create a stored credential
fn create_test_credential() -> Credential {
    Credential {
        access_token: "A1".to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: "R1".to_string(),
        scope: "user-read-private".to_string(),
        expires_in: 3600,
    }
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly 16 characters
    assert_eq!(state.len(), 16);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    let state2 = generate_state();
    assert_ne!(state, state2);
}

#[test]
fn test_join_artist_names() {
    let artists = vec![
        Artist {
            name: "Daft Punk".to_string(),
        },
        Artist {
            name: "Pharrell Williams".to_string(),
        },
    ];
    assert_eq!(join_artist_names(&artists), "Daft Punk, Pharrell Williams");

    // No artists yields an empty string
    assert_eq!(join_artist_names(&[]), "");
}

#[test]
fn test_with_default_limit_adds_missing_limit() {
    let url = with_default_limit("https://api.spotify.com/v1/me/playlists", 50).unwrap();
    assert_eq!(url, "https://api.spotify.com/v1/me/playlists?limit=50");

    // Existing query parameters are kept
    let url = with_default_limit("https://api.spotify.com/v1/me/playlists?offset=50", 50).unwrap();
    assert_eq!(url, "https://api.spotify.com/v1/me/playlists?offset=50&limit=50");
}

#[test]
fn test_with_default_limit_keeps_existing_limit() {
    let href = "https://api.spotify.com/v1/playlists/abc/tracks?offset=100&limit=100";
    assert_eq!(with_default_limit(href, 50).unwrap(), href);
}

#[test]
fn test_with_default_limit_rejects_relative_url() {
    assert!(with_default_limit("/me/playlists", 50).is_err());
}

#[test]
fn test_playlist_context_uri() {
    let playlist = create_test_playlist("abc", "spotify:playlist:abc");
    assert_eq!(playlist_context_uri(&playlist), "spotify:playlist:abc");

    // Falls back to building the URI from the id
    let playlist = create_test_playlist("xyz", "");
    assert_eq!(playlist_context_uri(&playlist), "spotify:playlist:xyz");
}

#[test]
fn test_merge_keeps_refresh_token_when_omitted() {
    let current = create_test_credential();
    let response = TokenResponse {
        access_token: "A2".to_string(),
        token_type: Some("Bearer".to_string()),
        refresh_token: None,
        scope: None,
        expires_in: Some(1800),
    };

    let merged = current.merge(response);
    assert_eq!(merged.access_token, "A2");
    assert_eq!(merged.refresh_token, "R1");
    assert_eq!(merged.scope, "user-read-private");
    assert_eq!(merged.expires_in, 1800);
}

#[test]
fn test_merge_replaces_rotated_refresh_token() {
    let current = create_test_credential();
    let response = TokenResponse {
        access_token: "A2".to_string(),
        token_type: None,
        refresh_token: Some("R2".to_string()),
        scope: Some("user-read-private playlist-read-private".to_string()),
        expires_in: None,
    };

    let merged = current.merge(response);
    assert_eq!(merged.refresh_token, "R2");
    assert_eq!(merged.scope, "user-read-private playlist-read-private");
    // Absent fields keep their previous values
    assert_eq!(merged.token_type, "Bearer");
    assert_eq!(merged.expires_in, 3600);
}

#[test]
fn test_token_response_with_only_access_token() {
    let response: TokenResponse = serde_json::from_str(r#"{"access_token":"A2"}"#).unwrap();
    let credential = Credential::from(response);

    assert_eq!(credential.access_token, "A2");
    assert_eq!(credential.token_type, "Bearer");
    assert_eq!(credential.refresh_token, "");
    assert_eq!(credential.expires_in, 0);
}
