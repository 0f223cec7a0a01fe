// src/auth/token_store.rs
//! In-memory store for live auth tokens and one-shot OAuth login states.
//!
//! Tokens are opaque random strings bound to a Discord id with a fixed
//! expiry. They live only in process memory; a restart invalidates every
//! outstanding token and users simply log in again. Entries are evicted
//! lazily on a failed validate and by a periodic sweep task.
//!
//! The store is injected through AppState rather than living as a module
//! global, so tests can construct their own instances.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

use crate::common::safe_token_log;

const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LENGTH: usize = 48;
const LOGIN_STATE_LENGTH: usize = 32;

/// Bearer tokens stay valid for a week, matching the session cookie.
pub const TOKEN_TTL_DAYS: i64 = 7;
/// A login state only needs to survive one trip to Discord and back.
const LOGIN_STATE_TTL_MINUTES: i64 = 10;

const SWEEP_INTERVAL_SECS: u64 = 900;

#[derive(Debug, Clone)]
struct IssuedToken {
    discord_id: String,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenStore {
    tokens: Arc<DashMap<String, IssuedToken>>,
    login_states: Arc<DashMap<String, DateTime<Utc>>>,
}

fn random_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_ALPHABET.len());
            TOKEN_ALPHABET[idx] as char
        })
        .collect()
}

impl TokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
            login_states: Arc::new(DashMap::new()),
        }
    }

    /// Mint a new token bound to a Discord id, valid for TOKEN_TTL_DAYS
    pub fn issue(&self, discord_id: &str) -> String {
        self.issue_with_ttl(discord_id, Duration::days(TOKEN_TTL_DAYS))
    }

    /// Mint a token with an explicit TTL. Exposed so tests can force the
    /// expiry boundary without manipulating the clock.
    pub fn issue_with_ttl(&self, discord_id: &str, ttl: Duration) -> String {
        let token = random_token(TOKEN_LENGTH);
        self.tokens.insert(
            token.clone(),
            IssuedToken {
                discord_id: discord_id.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        debug!(
            token = %safe_token_log(&token),
            discord_id = %discord_id,
            "Issued auth token"
        );
        token
    }

    /// Resolve a token to its bound Discord id if it is live.
    /// Expired entries are removed on the failed lookup; expired and
    /// never-issued tokens get the same answer.
    pub fn validate(&self, token: &str) -> Option<String> {
        let expired = match self.tokens.get(token) {
            Some(entry) => {
                if entry.expires_at > Utc::now() {
                    return Some(entry.discord_id.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            self.tokens.remove(token);
            debug!(token = %safe_token_log(token), "Evicted expired auth token");
        }

        None
    }

    /// Remove a token immediately (logout)
    pub fn revoke(&self, token: &str) {
        if self.tokens.remove(token).is_some() {
            debug!(token = %safe_token_log(token), "Revoked auth token");
        }
    }

    /// Issue a one-shot CSRF state for an OAuth login redirect
    pub fn issue_login_state(&self) -> String {
        let state = random_token(LOGIN_STATE_LENGTH);
        self.login_states.insert(
            state.clone(),
            Utc::now() + Duration::minutes(LOGIN_STATE_TTL_MINUTES),
        );
        state
    }

    /// Consume a login state. Succeeds at most once per issued state.
    pub fn consume_login_state(&self, state: &str) -> bool {
        match self.login_states.remove(state) {
            Some((_, expires_at)) => expires_at > Utc::now(),
            None => false,
        }
    }

    /// Drop every expired entry. Returns the number evicted.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let before = self.tokens.len() + self.login_states.len();
        self.tokens.retain(|_, entry| entry.expires_at > now);
        self.login_states.retain(|_, expires_at| *expires_at > now);
        before - (self.tokens.len() + self.login_states.len())
    }

    pub fn live_token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Spawn the periodic expiry sweep
    pub fn start_sweep_task(store: TokenStore) {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(SWEEP_INTERVAL_SECS));
            loop {
                interval.tick().await;
                let evicted = store.sweep();
                if evicted > 0 {
                    info!(evicted = evicted, "Token sweep evicted expired entries");
                }
            }
        });
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
