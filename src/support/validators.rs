//! Validation for support request submissions

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::SubmitSupportRequest;
use crate::common::{ValidationResult, Validator};

const MAX_SUBJECT_LENGTH: usize = 200;
const MAX_MESSAGE_LENGTH: usize = 5000;

const ALLOWED_CATEGORIES: &[&str] = &[
    "general",
    "billing",
    "ban-appeal",
    "bug-report",
    "base-issue",
    "shop-issue",
];

// Shape check only; the address is never verified
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl Validator<SubmitSupportRequest> for SubmitSupportRequest {
    fn validate(&self, data: &SubmitSupportRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.category.trim().is_empty() {
            result.add_error("category", "category is required");
        } else if !ALLOWED_CATEGORIES.contains(&data.category.trim()) {
            result.add_error("category", "unknown category");
        }

        if data.subject.trim().is_empty() {
            result.add_error("subject", "subject is required");
        } else if data.subject.len() > MAX_SUBJECT_LENGTH {
            result.add_error("subject", "subject is too long");
        }

        if data.message.trim().is_empty() {
            result.add_error("message", "message is required");
        } else if data.message.len() > MAX_MESSAGE_LENGTH {
            result.add_error("message", "message is too long");
        }

        if let Some(email) = &data.email {
            if !email.trim().is_empty() && !is_valid_email(email.trim()) {
                result.add_error("email", "email address is malformed");
            }
        }

        result
    }
}

/// Statuses a ticket can move through in the admin console
pub const ALLOWED_STATUSES: &[&str] = &["pending", "in-progress", "resolved", "closed"];

pub fn validate_status(status: &str) -> Result<(), String> {
    if ALLOWED_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "status must be one of: {}",
            ALLOWED_STATUSES.join(", ")
        ))
    }
}
