// Common module - shared types and utilities across all modules

/// Request body ceiling for the whole router. Sits above the largest
/// per-handler upload cap (10MB chat images) so the handlers' own size
/// checks are the ones that reject oversized payloads.
pub const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

pub mod error;
pub mod helpers;
pub mod id_generator;
pub mod migrations;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::ApiError;
pub use helpers::{safe_email_log, safe_token_log};
pub use id_generator::*;
pub use state::AppState;
pub use validation::{ValidationResult, Validator};
