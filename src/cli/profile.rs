use tabled::{Table, Tabled};

use crate::{
    config::Config,
    error::ApiError,
    management::ProfileStore,
    spotify::{SpotifyClient, profile},
    success,
    types::Profile,
    utils, warning,
};

#[derive(Tabled)]
struct ProfileField {
    field: &'static str,
    value: String,
}

/// Shows the logged-in user's profile and refreshes the cached copy.
///
/// When the API cannot be reached the cached profile from the last login
/// is shown instead.
pub async fn me(config: &Config) {
    let store = ProfileStore::new(config.profile_path());

    let pb = utils::spinner("Fetching profile...");
    let fetched = match SpotifyClient::new(config).await {
        Ok(mut client) => profile::fetch(&mut client, &config.api_url).await,
        Err(e) => Err(ApiError::from(e)),
    };
    pb.finish_and_clear();

    match fetched {
        Ok(profile) => {
            if let Err(e) = store.save(&profile).await {
                warning!("Couldn't update cached profile: {}", e);
            }
            success!("Logged in as {}", display_name(&profile));
            print_profile(&profile);
        }
        Err(e) => {
            super::report("Couldn't fetch profile", &e);
            if e.requires_login() {
                return;
            }
            if let Ok(cached) = store.load().await {
                warning!("Showing cached profile");
                print_profile(&cached);
            }
        }
    }
}

fn display_name(profile: &Profile) -> &str {
    profile
        .display_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(&profile.id)
}

fn print_profile(profile: &Profile) {
    let rows = vec![
        ProfileField {
            field: "Name",
            value: display_name(profile).to_string(),
        },
        ProfileField {
            field: "ID",
            value: profile.id.clone(),
        },
        ProfileField {
            field: "Email",
            value: profile.email.clone().unwrap_or_default(),
        },
        ProfileField {
            field: "Link",
            value: profile.external_urls.spotify.clone(),
        },
    ];
    println!("{}", Table::new(rows));
}
