use super::models::{CreateChallengeRequest, UpdateChallengeRequest, WeeklyChallenge};
use crate::common::ApiError;
use sqlx::SqlitePool;
use tracing::info;

pub struct ChallengesService {
    db: SqlitePool,
}

impl ChallengesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get the currently active challenges for the public site
    pub async fn get_active_challenges(&self) -> Result<Vec<WeeklyChallenge>, ApiError> {
        let challenges = sqlx::query_as::<_, WeeklyChallenge>(
            r#"
            SELECT id, title, description, xp_reward, is_active
            FROM weekly_challenges
            WHERE is_active = 1
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(challenges)
    }

    pub async fn get_challenge_by_id(
        &self,
        challenge_id: i64,
    ) -> Result<WeeklyChallenge, ApiError> {
        let challenge = sqlx::query_as::<_, WeeklyChallenge>(
            r#"
            SELECT id, title, description, xp_reward, is_active
            FROM weekly_challenges
            WHERE id = ?
            "#,
        )
        .bind(challenge_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Challenge not found".to_string()))?;

        Ok(challenge)
    }

    pub async fn create_challenge(
        &self,
        request: CreateChallengeRequest,
    ) -> Result<WeeklyChallenge, ApiError> {
        if request.title.trim().is_empty() || request.description.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "Challenge title and description are required".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO weekly_challenges (title, description, xp_reward, is_active)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.xp_reward.unwrap_or(100))
        .bind(request.is_active.unwrap_or(true))
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let challenge_id = result.last_insert_rowid();
        info!("Created challenge: {} ({})", request.title, challenge_id);

        self.get_challenge_by_id(challenge_id).await
    }

    pub async fn update_challenge(
        &self,
        challenge_id: i64,
        request: UpdateChallengeRequest,
    ) -> Result<WeeklyChallenge, ApiError> {
        self.get_challenge_by_id(challenge_id).await?;

        if let Some(title) = &request.title {
            if title.trim().is_empty() {
                return Err(ApiError::ValidationError(
                    "Challenge title cannot be empty".to_string(),
                ));
            }
        }

        sqlx::query(
            r#"
            UPDATE weekly_challenges
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                xp_reward = COALESCE(?, xp_reward),
                is_active = COALESCE(?, is_active)
            WHERE id = ?
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.xp_reward)
        .bind(request.is_active)
        .bind(challenge_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!("Updated challenge: {}", challenge_id);

        self.get_challenge_by_id(challenge_id).await
    }

    pub async fn delete_challenge(&self, challenge_id: i64) -> Result<(), ApiError> {
        self.get_challenge_by_id(challenge_id).await?;

        sqlx::query("DELETE FROM weekly_challenges WHERE id = ?")
            .bind(challenge_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!("Deleted challenge: {}", challenge_id);

        Ok(())
    }
}
