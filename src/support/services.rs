use super::models::{SubmitSupportRequest, SupportRequest, UpdateStatusRequest};
use super::validators;
use crate::common::{ApiError, Validator};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

pub struct SupportService {
    db: SqlitePool,
}

impl SupportService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_request(
        &self,
        request: SubmitSupportRequest,
    ) -> Result<SupportRequest, ApiError> {
        let validation_result = request.validate(&request);
        if !validation_result.is_valid {
            return Err(ApiError::from(validation_result));
        }

        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO support_requests (name, email, discord_username, category, subject, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 'pending', ?)
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.discord_username)
        .bind(request.category.trim())
        .bind(request.subject.trim())
        .bind(&request.message)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let request_id = result.last_insert_rowid();
        info!(request_id = request_id, "Support request submitted");

        self.get_request_by_id(request_id).await
    }

    pub async fn get_request_by_id(&self, request_id: i64) -> Result<SupportRequest, ApiError> {
        sqlx::query_as::<_, SupportRequest>(
            r#"
            SELECT id, name, email, discord_username, category, subject, message, status, created_at
            FROM support_requests
            WHERE id = ?
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Support request not found".to_string()))
    }

    /// All requests, newest first
    pub async fn get_all_requests(&self) -> Result<Vec<SupportRequest>, ApiError> {
        let requests = sqlx::query_as::<_, SupportRequest>(
            r#"
            SELECT id, name, email, discord_username, category, subject, message, status, created_at
            FROM support_requests
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(requests)
    }

    pub async fn update_status(
        &self,
        request_id: i64,
        request: UpdateStatusRequest,
    ) -> Result<SupportRequest, ApiError> {
        validators::validate_status(&request.status).map_err(ApiError::ValidationError)?;

        self.get_request_by_id(request_id).await?;

        sqlx::query("UPDATE support_requests SET status = ? WHERE id = ?")
            .bind(&request.status)
            .bind(request_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(
            request_id = request_id,
            status = %request.status,
            "Support request status updated"
        );

        self.get_request_by_id(request_id).await
    }
}
