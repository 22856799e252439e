mod common;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri, header::HOST};
use axum::routing::{get, post, put};
use serde_json::{Value, json};
use std::collections::HashMap;
use tempfile::TempDir;

use common::{Mock, base_router, client, credential, serve, store_in};
use spotterm::error::ApiError;
use spotterm::spotify::playback::{self, PlaybackOutcome};
use spotterm::spotify::{playlists, profile, search};
use spotterm::types::PlaybackRequest;

async fn playlists_page(
    State(mock): State<Mock>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    mock.record(&uri);
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let base = format!("http://{host}");
    if params.get("offset").map(String::as_str) == Some("2") {
        Json(json!({
            "items": [
                { "id": "p3", "name": "Sleep", "uri": "spotify:playlist:p3",
                  "tracks": { "href": format!("{base}/playlists/p3/tracks"), "total": 0 } }
            ],
            "next": null
        }))
    } else {
        Json(json!({
            "items": [
                { "id": "p1", "name": "Focus", "uri": "spotify:playlist:p1",
                  "tracks": { "href": format!("{base}/playlists/p1/tracks"), "total": 2 } },
                { "id": "p2", "name": "Run", "uri": "",
                  "tracks": { "href": format!("{base}/playlists/p2/tracks"), "total": 1 } }
            ],
            "next": format!("{base}/me/playlists?offset=2&limit=2")
        }))
    }
}

async fn playlist_tracks(State(mock): State<Mock>, uri: Uri) -> Json<Value> {
    mock.record(&uri);
    Json(json!({
        "items": [
            { "track": { "id": "t1", "name": "One", "uri": "spotify:track:t1",
                         "artists": [{ "name": "Air" }] } },
            { "track": null },
            { "track": { "id": "t2", "name": "Two", "uri": "spotify:track:t2",
                         "artists": [{ "name": "Air" }, { "name": "Beck" }] } }
        ],
        "next": null
    }))
}

async fn search_tracks(State(mock): State<Mock>, uri: Uri) -> Json<Value> {
    mock.record(&uri);
    Json(json!({
        "tracks": {
            "items": [
                { "id": "t9", "name": "Teardrop", "uri": "spotify:track:t9",
                  "artists": [{ "name": "Massive Attack" }],
                  "external_urls": { "spotify": "https://open.spotify.com/track/t9" } }
            ]
        }
    }))
}

async fn player(State(mock): State<Mock>, headers: HeaderMap) -> (StatusCode, String) {
    if !mock.authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, String::new());
    }
    (
        StatusCode::OK,
        json!({
            "is_playing": true,
            "item": { "id": "t9", "name": "Teardrop", "uri": "spotify:track:t9",
                      "artists": [{ "name": "Massive Attack" }] }
        })
        .to_string(),
    )
}

async fn play(State(mock): State<Mock>, body: String) -> StatusCode {
    mock.requests.lock().expect("requests").push(body);
    StatusCode::NO_CONTENT
}

fn router() -> axum::Router<Mock> {
    base_router()
        .route("/me/playlists", get(playlists_page))
        .route("/playlists/{id}/tracks", get(playlist_tracks))
        .route("/search", get(search_tracks))
        .route("/me/player", get(player))
        .route("/me/player/play", put(play))
        .route("/me/player/pause", put(|| async { StatusCode::NO_CONTENT }))
        .route("/me/player/next", post(|| async { StatusCode::NOT_FOUND }))
        .route("/me/player/previous", post(|| async { StatusCode::FORBIDDEN }))
}

async fn setup(accepted: &str) -> (Mock, String, spotterm::spotify::SpotifyClient, TempDir) {
    let mock = Mock::new(accepted, vec![]);
    let addr = serve(router(), &mock).await;
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.save(&credential("A1", "R1")).await.expect("save");
    let client = client(addr, store).await;
    (mock, format!("http://{addr}"), client, dir)
}

#[tokio::test]
async fn profile_fetch_decodes_me() {
    let (_mock, api, mut client, _dir) = setup("A1").await;

    let profile = profile::fetch(&mut client, &api).await.expect("profile");
    assert_eq!(profile.id, "u1");
    assert_eq!(profile.display_name.as_deref(), Some("User One"));
    assert_eq!(profile.external_urls.spotify, "https://open.spotify.com/user/u1");
}

#[tokio::test]
async fn playlists_follow_next_links_and_add_default_limit() {
    let (mock, api, mut client, _dir) = setup("A1").await;
    let href = playlists::playlists_url(&api, None);
    let all = playlists::fetch_all(&mut client, &href).await.expect("playlists");

    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Focus", "Run", "Sleep"]);

    let requests = mock.recorded();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("limit=50"));
    // The next link already carries its own limit.
    assert!(requests[1].contains("limit=2"));
    assert!(!requests[1].contains("limit=50"));
}

#[tokio::test]
async fn playlist_tracks_skip_unavailable_entries() {
    let (mock, api, mut client, _dir) = setup("A1").await;

    let tracks = playlists::fetch_all_tracks(&mut client, &format!("{api}/playlists/p1/tracks"))
        .await
        .expect("tracks");

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1].artists.len(), 2);
    assert!(mock.recorded()[0].contains("limit=100"));
}

#[tokio::test]
async fn search_sends_query_type_and_limit() {
    let (mock, api, mut client, _dir) = setup("A1").await;

    let found = search::tracks(&mut client, &api, "massive attack", 10)
        .await
        .expect("search");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].external_urls.spotify, "https://open.spotify.com/track/t9");
    let request = &mock.recorded()[0];
    assert!(request.contains("q=massive+attack"));
    assert!(request.contains("type=track"));
    assert!(request.contains("limit=10"));
}

#[tokio::test]
async fn blank_search_makes_no_request() {
    let (mock, api, mut client, _dir) = setup("A1").await;

    let found = search::tracks(&mut client, &api, "   ", 10).await.expect("search");
    assert!(found.is_empty());
    assert!(mock.recorded().is_empty());
}

#[tokio::test]
async fn current_playback_is_simplified() {
    let (_mock, api, mut client, _dir) = setup("A1").await;

    let info = playback::current(&mut client, &api).await.expect("playback");
    assert!(info.is_playing);
    assert_eq!(info.track_name, "Teardrop");
    assert_eq!(info.artist_name, "Massive Attack");
    assert_eq!(info.track_uri, "spotify:track:t9");
}

#[tokio::test]
async fn player_statuses_map_to_outcomes() {
    let (mock, api, mut client, _dir) = setup("A1").await;

    assert_eq!(
        playback::pause(&mut client, &api).await.expect("pause"),
        PlaybackOutcome::Done
    );
    assert_eq!(
        playback::next(&mut client, &api).await.expect("next"),
        PlaybackOutcome::NoActiveDevice
    );
    assert_eq!(
        playback::previous(&mut client, &api).await.expect("previous"),
        PlaybackOutcome::PremiumRequired
    );

    let request = PlaybackRequest {
        context_uri: Some("spotify:playlist:p1".to_owned()),
        ..Default::default()
    };
    assert_eq!(
        playback::start(&mut client, &api, &request).await.expect("play"),
        PlaybackOutcome::Done
    );
    let body: Value = serde_json::from_str(&mock.recorded()[0]).expect("play body");
    assert_eq!(body, json!({ "context_uri": "spotify:playlist:p1" }));
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let (_mock, api, mut client, _dir) = setup("A1").await;

    let err = playlists::fetch_all(&mut client, &format!("{api}/missing"))
        .await
        .expect_err("404 must fail");
    match err {
        ApiError::Status { status, .. } => assert_eq!(status, StatusCode::NOT_FOUND),
        other => panic!("unexpected error {other}"),
    }
}
