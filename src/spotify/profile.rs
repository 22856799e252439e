use crate::{error::ApiError, spotify::SpotifyClient, types::Profile};

/// Fetches the current user's profile (`GET /me`).
pub async fn fetch(client: &mut SpotifyClient, api_url: &str) -> Result<Profile, ApiError> {
    let response = client.get(&format!("{}/me", api_url)).await?;
    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    Ok(response.json::<Profile>().await?)
}
