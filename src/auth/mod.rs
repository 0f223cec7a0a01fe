//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Discord OAuth login flow
//! - In-memory auth token issuance and validation
//! - AuthedUser / AdminUser extractors for protected routes
//! - Break-glass admin access code handling

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod token_store;

#[cfg(test)]
mod tests;

pub use extractors::{AdminUser, AuthedUser};
pub use models::User;
pub use routes::auth_routes;
pub use token_store::TokenStore;
