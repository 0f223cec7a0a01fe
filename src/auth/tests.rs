//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Token store issue/validate/revoke lifecycle and expiry
//! - One-shot login state consumption
//! - Credential resolution order (cookie before bearer)

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::extractors::{credential_from_headers, session_token_from_cookies};
    use axum::http::{header, HeaderMap, HeaderValue};
    use chrono::Duration;

    #[test]
    fn test_issued_token_validates_to_bound_identity() {
        let store = TokenStore::new();
        let token = store.issue("discord-123");

        assert_eq!(store.validate(&token), Some("discord-123".to_string()));
        // Reusable bearer: repeated validation keeps succeeding
        assert_eq!(store.validate(&token), Some("discord-123".to_string()));
    }

    #[test]
    fn test_expired_token_validates_to_none() {
        let store = TokenStore::new();
        let token = store.issue_with_ttl("discord-123", Duration::seconds(-1));

        assert_eq!(store.validate(&token), None);
        // The expired entry is evicted by the failed lookup
        assert_eq!(store.live_token_count(), 0);
    }

    #[test]
    fn test_expired_and_unknown_tokens_are_indistinguishable() {
        let store = TokenStore::new();
        let expired = store.issue_with_ttl("discord-123", Duration::seconds(-1));

        assert_eq!(store.validate(&expired), None);
        assert_eq!(store.validate("never-issued"), None);
    }

    #[test]
    fn test_revoked_token_validates_to_none() {
        let store = TokenStore::new();
        let token = store.issue("discord-123");

        store.revoke(&token);
        assert_eq!(store.validate(&token), None);

        // Revoking again is a no-op, not a panic
        store.revoke(&token);
        assert_eq!(store.validate(&token), None);
    }

    #[test]
    fn test_tokens_are_independent() {
        let store = TokenStore::new();
        let t1 = store.issue("discord-1");
        let t2 = store.issue("discord-2");

        store.revoke(&t1);
        assert_eq!(store.validate(&t1), None);
        assert_eq!(store.validate(&t2), Some("discord-2".to_string()));
    }

    #[test]
    fn test_login_state_consumes_exactly_once() {
        let store = TokenStore::new();
        let state = store.issue_login_state();

        assert!(store.consume_login_state(&state));
        assert!(!store.consume_login_state(&state));
        assert!(!store.consume_login_state("unknown-state"));
    }

    #[test]
    fn test_sweep_evicts_only_expired_entries() {
        let store = TokenStore::new();
        let live = store.issue("discord-live");
        store.issue_with_ttl("discord-dead", Duration::seconds(-1));
        store.issue_with_ttl("discord-dead-too", Duration::seconds(-1));

        let evicted = store.sweep();
        assert_eq!(evicted, 2);
        assert_eq!(store.validate(&live), Some("discord-live".to_string()));
    }

    #[test]
    fn test_session_token_from_cookies() {
        assert_eq!(
            session_token_from_cookies("asylum_session=tok123"),
            Some("tok123".to_string())
        );
        assert_eq!(
            session_token_from_cookies("theme=dark; asylum_session=tok123; lang=en"),
            Some("tok123".to_string())
        );
        assert_eq!(session_token_from_cookies("theme=dark"), None);
        assert_eq!(session_token_from_cookies("asylum_session="), None);
        // Prefix of the cookie name is not a match
        assert_eq!(session_token_from_cookies("asylum_session_old=tok"), None);
    }

    #[test]
    fn test_credential_resolution_prefers_cookie_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("asylum_session=cookie-token"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer bearer-token"),
        );

        assert_eq!(
            credential_from_headers(&headers),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn test_credential_resolution_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer bearer-token"),
        );

        assert_eq!(
            credential_from_headers(&headers),
            Some("bearer-token".to_string())
        );

        // Raw token without the Bearer prefix is accepted too
        let mut raw = HeaderMap::new();
        raw.insert(header::AUTHORIZATION, HeaderValue::from_static("tok"));
        assert_eq!(credential_from_headers(&raw), Some("tok".to_string()));
    }

    #[test]
    fn test_credential_resolution_empty_headers() {
        let headers = HeaderMap::new();
        assert_eq!(credential_from_headers(&headers), None);
    }

    #[tokio::test]
    async fn test_repeated_callback_upserts_one_row_with_fresh_profile() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::common::migrations::run_migrations(&pool)
            .await
            .unwrap();

        let profile = crate::services::discord::DiscordProfile {
            id: "111222333".to_string(),
            username: "survivor".to_string(),
            email: Some("survivor@example.com".to_string()),
            avatar: None,
        };
        let first = handlers::upsert_user(&pool, &profile).await.unwrap();
        assert_eq!(first.username, "survivor");

        // Second login with a renamed Discord account
        let renamed = crate::services::discord::DiscordProfile {
            username: "raider".to_string(),
            ..profile
        };
        let second = handlers::upsert_user(&pool, &renamed).await.unwrap();

        // Same row, refreshed profile fields
        assert_eq!(second.id, first.id);
        assert_eq!(second.username, "raider");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE discord_id = ?")
            .bind("111222333")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_user_model_structure() {
        let user = models::User {
            id: "U_K7NP3X".to_string(),
            discord_id: "111222333".to_string(),
            username: "survivor".to_string(),
            email: Some("survivor@example.com".to_string()),
            avatar_url: Some("https://cdn.discordapp.com/avatars/111222333/a.png".to_string()),
            is_admin: false,
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            updated_at: Some("2024-01-01T00:00:00Z".to_string()),
        };

        assert_eq!(user.discord_id, "111222333");
        assert!(!user.is_admin);
    }
}
