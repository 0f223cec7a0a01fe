use super::models::{CreateServerRequest, Server, UpdateServerRequest};
use crate::common::ApiError;
use sqlx::SqlitePool;
use tracing::info;

pub struct ServersService {
    db: SqlitePool,
}

impl ServersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all servers in insertion order
    pub async fn get_all_servers(&self) -> Result<Vec<Server>, ApiError> {
        let servers = sqlx::query_as::<_, Server>(
            r#"
            SELECT id, name, map, description, multiplier, features, connection_info
            FROM servers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(servers)
    }

    pub async fn get_server_by_id(&self, server_id: i64) -> Result<Server, ApiError> {
        let server = sqlx::query_as::<_, Server>(
            r#"
            SELECT id, name, map, description, multiplier, features, connection_info
            FROM servers
            WHERE id = ?
            "#,
        )
        .bind(server_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Server not found".to_string()))?;

        Ok(server)
    }

    pub async fn create_server(&self, request: CreateServerRequest) -> Result<Server, ApiError> {
        if request.name.trim().is_empty() || request.map.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "Server name and map are required".to_string(),
            ));
        }

        let features_json = request
            .features
            .as_ref()
            .map(|f| serde_json::to_string(f).unwrap_or_else(|_| "[]".to_string()));

        let result = sqlx::query(
            r#"
            INSERT INTO servers (name, map, description, multiplier, features, connection_info)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.name)
        .bind(&request.map)
        .bind(&request.description)
        .bind(&request.multiplier)
        .bind(features_json.as_deref())
        .bind(&request.connection_info)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let server_id = result.last_insert_rowid();
        info!("Created server: {} ({})", request.name, server_id);

        self.get_server_by_id(server_id).await
    }

    pub async fn update_server(
        &self,
        server_id: i64,
        request: UpdateServerRequest,
    ) -> Result<Server, ApiError> {
        self.get_server_by_id(server_id).await?;

        let mut updates = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(ApiError::ValidationError(
                    "Server name cannot be empty".to_string(),
                ));
            }
            updates.push("name = ?");
            params.push(name.clone());
        }

        if let Some(map) = &request.map {
            updates.push("map = ?");
            params.push(map.clone());
        }

        if let Some(description) = &request.description {
            updates.push("description = ?");
            params.push(description.clone());
        }

        if let Some(multiplier) = &request.multiplier {
            updates.push("multiplier = ?");
            params.push(multiplier.clone());
        }

        if let Some(features) = &request.features {
            updates.push("features = ?");
            params.push(serde_json::to_string(features).unwrap_or_else(|_| "[]".to_string()));
        }

        if let Some(connection_info) = &request.connection_info {
            updates.push("connection_info = ?");
            params.push(connection_info.clone());
        }

        if updates.is_empty() {
            return self.get_server_by_id(server_id).await;
        }

        let query = format!("UPDATE servers SET {} WHERE id = ?", updates.join(", "));

        let mut query_builder = sqlx::query(&query);
        for param in params {
            query_builder = query_builder.bind(param);
        }
        query_builder = query_builder.bind(server_id);

        query_builder
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!("Updated server: {}", server_id);

        self.get_server_by_id(server_id).await
    }

    pub async fn delete_server(&self, server_id: i64) -> Result<(), ApiError> {
        self.get_server_by_id(server_id).await?;

        sqlx::query("DELETE FROM servers WHERE id = ?")
            .bind(server_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!("Deleted server: {}", server_id);

        Ok(())
    }
}
