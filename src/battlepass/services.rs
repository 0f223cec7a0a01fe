use super::models::{
    BattlepassConfig, BattlepassLevel, CreateLevelRequest, UpdateConfigRequest, UpdateLevelRequest,
};
use crate::common::ApiError;
use sqlx::SqlitePool;
use tracing::info;

pub struct BattlepassService {
    db: SqlitePool,
}

impl BattlepassService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get the season config, creating the default row on first access
    pub async fn get_config(&self) -> Result<BattlepassConfig, ApiError> {
        let config = sqlx::query_as::<_, BattlepassConfig>(
            "SELECT id, season_name, days_left, theme_color FROM battlepass_config LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if let Some(config) = config {
            return Ok(config);
        }

        sqlx::query("INSERT INTO battlepass_config DEFAULT VALUES")
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        sqlx::query_as::<_, BattlepassConfig>(
            "SELECT id, season_name, days_left, theme_color FROM battlepass_config LIMIT 1",
        )
        .fetch_one(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn update_config(
        &self,
        request: UpdateConfigRequest,
    ) -> Result<BattlepassConfig, ApiError> {
        let existing = self.get_config().await?;

        if let Some(days_left) = request.days_left {
            if days_left < 0 {
                return Err(ApiError::ValidationError(
                    "days_left cannot be negative".to_string(),
                ));
            }
        }

        sqlx::query(
            r#"
            UPDATE battlepass_config
            SET season_name = COALESCE(?, season_name),
                days_left = COALESCE(?, days_left),
                theme_color = COALESCE(?, theme_color)
            WHERE id = ?
            "#,
        )
        .bind(&request.season_name)
        .bind(request.days_left)
        .bind(&request.theme_color)
        .bind(existing.id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!("Updated battlepass config");

        self.get_config().await
    }

    /// List all reward tiers ordered by level
    pub async fn get_levels(&self) -> Result<Vec<BattlepassLevel>, ApiError> {
        let levels = sqlx::query_as::<_, BattlepassLevel>(
            r#"
            SELECT id, level, free_reward, premium_reward, image_url, free_image_url, premium_image_url
            FROM battlepass_levels
            ORDER BY level ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(levels)
    }

    pub async fn get_level_by_id(&self, level_id: i64) -> Result<BattlepassLevel, ApiError> {
        let level = sqlx::query_as::<_, BattlepassLevel>(
            r#"
            SELECT id, level, free_reward, premium_reward, image_url, free_image_url, premium_image_url
            FROM battlepass_levels
            WHERE id = ?
            "#,
        )
        .bind(level_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Battlepass level not found".to_string()))?;

        Ok(level)
    }

    pub async fn create_level(
        &self,
        request: CreateLevelRequest,
    ) -> Result<BattlepassLevel, ApiError> {
        if request.level < 1 {
            return Err(ApiError::ValidationError(
                "level must be at least 1".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO battlepass_levels (level, free_reward, premium_reward, image_url, free_image_url, premium_image_url)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.level)
        .bind(&request.free_reward)
        .bind(&request.premium_reward)
        .bind(&request.image_url)
        .bind(&request.free_image_url)
        .bind(&request.premium_image_url)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let level_id = result.last_insert_rowid();
        info!("Created battlepass level {} ({})", request.level, level_id);

        self.get_level_by_id(level_id).await
    }

    pub async fn update_level(
        &self,
        level_id: i64,
        request: UpdateLevelRequest,
    ) -> Result<BattlepassLevel, ApiError> {
        self.get_level_by_id(level_id).await?;

        sqlx::query(
            r#"
            UPDATE battlepass_levels
            SET level = COALESCE(?, level),
                free_reward = COALESCE(?, free_reward),
                premium_reward = COALESCE(?, premium_reward),
                image_url = COALESCE(?, image_url),
                free_image_url = COALESCE(?, free_image_url),
                premium_image_url = COALESCE(?, premium_image_url)
            WHERE id = ?
            "#,
        )
        .bind(request.level)
        .bind(&request.free_reward)
        .bind(&request.premium_reward)
        .bind(&request.image_url)
        .bind(&request.free_image_url)
        .bind(&request.premium_image_url)
        .bind(level_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!("Updated battlepass level: {}", level_id);

        self.get_level_by_id(level_id).await
    }
}
