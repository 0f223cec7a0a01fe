// src/services/discord.rs
//! Discord OAuth2 integration
//!
//! Wraps the three provider calls the login flow needs: building the
//! authorize URL, exchanging the callback code for an access token, and
//! fetching the profile of the user who just authorized.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_USER_URL: &str = "https://discord.com/api/users/@me";
const DISCORD_CDN_BASE: &str = "https://cdn.discordapp.com";

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Discord OAuth not configured")]
    NotConfigured,

    #[error("OAuth flow failed: {0}")]
    OAuthFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Access token response from Discord's token endpoint
#[derive(Debug, Deserialize)]
pub struct DiscordTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    pub scope: String,
}

/// Profile shape returned by /users/@me.
/// This is the only provider-specific type allowed past the callback
/// boundary; everything downstream consumes the local User row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordProfile {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl DiscordProfile {
    /// CDN URL for the user's avatar, when they have one
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("{}/avatars/{}/{}.png", DISCORD_CDN_BASE, self.id, hash))
    }
}

#[derive(Debug, Clone)]
pub struct DiscordService {
    client_id: Option<String>,
    client_secret: Option<String>,
    client: Client,
}

impl DiscordService {
    pub fn new(client_id: Option<String>, client_secret: Option<String>, client: Client) -> Self {
        if client_id.is_none() || client_secret.is_none() {
            info!("Discord OAuth not configured: missing DISCORD_CLIENT_ID or DISCORD_CLIENT_SECRET");
        }
        Self {
            client_id,
            client_secret,
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str), DiscordError> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(DiscordError::NotConfigured),
        }
    }

    /// Build the authorize URL the browser is redirected to.
    /// The redirect URI is derived per request host, so each deployment
    /// hostname works without extra configuration.
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, DiscordError> {
        let (client_id, _) = self.credentials()?;

        Ok(format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope=identify%20email&state={}",
            DISCORD_AUTHORIZE_URL,
            urlencoding::encode(client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(state),
        ))
    }

    /// Exchange the authorization code for an access token.
    /// The redirect URI must match the one used in the authorize redirect.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<DiscordTokenResponse, DiscordError> {
        let (client_id, client_secret) = self.credentials()?;

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        debug!("Exchanging Discord authorization code");

        let response = self
            .client
            .post(DISCORD_TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting Discord token endpoint");
                DiscordError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(http_status = %status, "Discord token exchange rejected");
            return Err(DiscordError::OAuthFailed(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        response
            .json::<DiscordTokenResponse>()
            .await
            .map_err(|e| DiscordError::InvalidResponse(e.to_string()))
    }

    /// Fetch the authorizing user's profile with their access token
    pub async fn fetch_profile(&self, access_token: &str) -> Result<DiscordProfile, DiscordError> {
        let response = self
            .client
            .get(DISCORD_USER_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting Discord user endpoint");
                DiscordError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(http_status = %status, "Discord profile fetch rejected");
            return Err(DiscordError::OAuthFailed(format!(
                "user endpoint returned {}",
                status
            )));
        }

        let profile = response
            .json::<DiscordProfile>()
            .await
            .map_err(|e| DiscordError::InvalidResponse(e.to_string()))?;

        if profile.id.is_empty() {
            return Err(DiscordError::InvalidResponse(
                "profile missing user id".to_string(),
            ));
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured_service() -> DiscordService {
        DiscordService::new(
            Some("client-id-123".to_string()),
            Some("secret-456".to_string()),
            Client::new(),
        )
    }

    #[test]
    fn test_unconfigured_service_refuses_authorize_url() {
        let service = DiscordService::new(None, None, Client::new());
        assert!(!service.is_configured());
        assert!(matches!(
            service.authorization_url("https://example.com/api/callback", "state"),
            Err(DiscordError::NotConfigured)
        ));
    }

    #[test]
    fn test_authorization_url_contains_encoded_params() {
        let service = configured_service();
        let url = service
            .authorization_url("https://asylum.example/api/callback", "abc123")
            .unwrap();

        assert!(url.starts_with(DISCORD_AUTHORIZE_URL));
        assert!(url.contains("client_id=client-id-123"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fasylum.example%2Fapi%2Fcallback"));
        assert!(url.contains("scope=identify%20email"));
        assert!(url.contains("state=abc123"));
    }

    #[test]
    fn test_avatar_url_construction() {
        let profile = DiscordProfile {
            id: "111222333".to_string(),
            username: "survivor".to_string(),
            email: None,
            avatar: Some("a1b2c3".to_string()),
        };

        assert_eq!(
            profile.avatar_url().unwrap(),
            "https://cdn.discordapp.com/avatars/111222333/a1b2c3.png"
        );

        let bald = DiscordProfile {
            avatar: None,
            ..profile
        };
        assert!(bald.avatar_url().is_none());
    }
}
