//! Tests for servers module

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_server_serializes_features_as_array() {
        let server = models::Server {
            id: 1,
            name: "Livonia 101x | ASYLUM\u{2122}".to_string(),
            map: "Livonia".to_string(),
            description: "High loot, full cars, PvPvE experience in Livonia.".to_string(),
            multiplier: "101x".to_string(),
            features: Some(r#"["PvPvE","Full cars","Economy"]"#.to_string()),
            connection_info: Some("127.0.0.1:2302".to_string()),
        };

        let json = serde_json::to_value(&server).unwrap();
        assert_eq!(
            json["features"],
            serde_json::json!(["PvPvE", "Full cars", "Economy"])
        );
    }

    #[test]
    fn test_server_with_no_features_serializes_empty_array() {
        let server = models::Server {
            id: 2,
            name: "Chernarus 102x".to_string(),
            map: "Chernarus".to_string(),
            description: "Extreme survival.".to_string(),
            multiplier: "102x".to_string(),
            features: None,
            connection_info: None,
        };

        let json = serde_json::to_value(&server).unwrap();
        assert_eq!(json["features"], serde_json::json!([]));
    }

    #[test]
    fn test_malformed_features_column_degrades_to_empty_array() {
        let server = models::Server {
            id: 3,
            name: "Test".to_string(),
            map: "Livonia".to_string(),
            description: "d".to_string(),
            multiplier: "1x".to_string(),
            features: Some("not-json".to_string()),
            connection_info: None,
        };

        let json = serde_json::to_value(&server).unwrap();
        assert_eq!(json["features"], serde_json::json!([]));
    }

    #[test]
    fn test_update_request_deserializes_partial_body() {
        let request: models::UpdateServerRequest =
            serde_json::from_str(r#"{"description": "New description"}"#).unwrap();

        assert_eq!(request.description.as_deref(), Some("New description"));
        assert!(request.name.is_none());
        assert!(request.features.is_none());
    }
}
