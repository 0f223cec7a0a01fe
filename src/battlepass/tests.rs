//! Tests for battlepass module

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::battlepass::handlers::content_type_from_extension;

    #[test]
    fn test_upload_cap_fits_under_router_body_limit() {
        // If the router's body ceiling sat below this cap, uploads in
        // between would die with a framework error instead of ours
        assert!(handlers::MAX_IMAGE_BYTES < crate::common::MAX_BODY_BYTES);
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_from_extension("bp-1-A2B3C4.png"), "image/png");
        assert_eq!(content_type_from_extension("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_from_extension("photo.jpg"), "image/jpeg");
        assert_eq!(content_type_from_extension("anim.gif"), "image/gif");
        assert_eq!(content_type_from_extension("modern.webp"), "image/webp");
        assert_eq!(
            content_type_from_extension("mystery.bin"),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_from_extension("no-extension"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_config_serializes_with_snake_case_fields() {
        let config = models::BattlepassConfig {
            id: 1,
            season_name: "Genesis".to_string(),
            days_left: 25,
            theme_color: "tech-blue".to_string(),
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["season_name"], "Genesis");
        assert_eq!(json["days_left"], 25);
    }

    #[test]
    fn test_upload_response_uses_camel_case_image_url() {
        let response = models::UploadResponse {
            image_url: "/uploads/bp-1-AAAAAA.png".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["imageUrl"], "/uploads/bp-1-AAAAAA.png");
    }

    #[test]
    fn test_partial_level_update_deserializes() {
        let request: models::UpdateLevelRequest =
            serde_json::from_str(r#"{"premium_reward": "M4A1 Wrap"}"#).unwrap();

        assert_eq!(request.premium_reward.as_deref(), Some("M4A1 Wrap"));
        assert!(request.level.is_none());
        assert!(request.free_reward.is_none());
    }
}
