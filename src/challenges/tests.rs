//! Tests for challenges module

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_create_request_defaults_are_absent_until_insert() {
        let request: models::CreateChallengeRequest = serde_json::from_str(
            r#"{"title": "Airdrop Hunter", "description": "Loot 3 airdrops this week"}"#,
        )
        .unwrap();

        assert_eq!(request.title, "Airdrop Hunter");
        assert!(request.xp_reward.is_none());
        assert!(request.is_active.is_none());
    }

    #[test]
    fn test_update_request_deserializes_partial_body() {
        let request: models::UpdateChallengeRequest =
            serde_json::from_str(r#"{"is_active": false}"#).unwrap();

        assert_eq!(request.is_active, Some(false));
        assert!(request.title.is_none());
        assert!(request.xp_reward.is_none());
    }

    #[test]
    fn test_challenge_serializes_all_fields() {
        let challenge = models::WeeklyChallenge {
            id: 7,
            title: "Bridge Troll".to_string(),
            description: "Win 5 fights on the Novo bridge".to_string(),
            xp_reward: 250,
            is_active: true,
        };

        let json = serde_json::to_value(&challenge).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["xp_reward"], 250);
        assert_eq!(json["is_active"], true);
    }
}
