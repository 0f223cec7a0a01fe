//! Tests for support module

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::Validator;
    use models::SubmitSupportRequest;
    use validators::{validate_status, ALLOWED_STATUSES};

    fn valid_request() -> SubmitSupportRequest {
        SubmitSupportRequest {
            name: Some("Survivor".to_string()),
            email: Some("survivor@example.com".to_string()),
            discord_username: Some("survivor#1234".to_string()),
            category: "general".to_string(),
            subject: "Lost my base".to_string(),
            message: "Logged in after the wipe and my base marker is gone.".to_string(),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        let request = valid_request();
        assert!(request.validate(&request).is_valid);
    }

    #[test]
    fn test_contact_fields_are_optional() {
        let mut request = valid_request();
        request.name = None;
        request.email = None;
        request.discord_username = None;
        assert!(request.validate(&request).is_valid);
    }

    #[test]
    fn test_blank_subject_is_rejected() {
        let mut request = valid_request();
        request.subject = "   ".to_string();
        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "subject");
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let mut request = valid_request();
        request.message = String::new();
        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "message");
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let mut request = valid_request();
        request.category = "gardening".to_string();
        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "category");
    }

    #[test]
    fn test_oversized_subject_is_rejected() {
        let mut request = valid_request();
        request.subject = "x".repeat(201);
        assert!(!request.validate(&request).is_valid);
    }

    #[test]
    fn test_oversized_message_is_rejected() {
        let mut request = valid_request();
        request.message = "x".repeat(5001);
        assert!(!request.validate(&request).is_valid);
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let mut request = valid_request();
        request.email = Some("not-an-email".to_string());
        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "email");
    }

    #[test]
    fn test_empty_email_is_treated_as_absent() {
        let mut request = valid_request();
        request.email = Some("  ".to_string());
        assert!(request.validate(&request).is_valid);
    }

    #[test]
    fn test_status_transitions_are_constrained() {
        for status in ALLOWED_STATUSES {
            assert!(validate_status(status).is_ok());
        }
        assert!(validate_status("archived").is_err());
        assert!(validate_status("").is_err());
    }
}
