use crate::{config::Config, spotify, warning};

pub async fn login(config: &Config) {
    if let Err(e) = spotify::auth::login(config).await {
        warning!("Login failed: {}", e);
    }
}
