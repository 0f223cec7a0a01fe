// src/common/migrations.rs
//! Database migration and schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations.
///
/// Tables are created if missing. Setting RESET_DB=true drops everything
/// first, which is only intended for local development.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - dropping all tables and recreating schema");
        drop_all_tables(pool).await?;
    }

    create_user_tables(pool).await?;
    create_server_tables(pool).await?;
    create_battlepass_tables(pool).await?;
    create_support_tables(pool).await?;
    create_challenge_tables(pool).await?;
    create_indexes(pool).await?;

    seed_default_data(pool).await?;

    info!("Database migration completed");

    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let tables = [
        "weekly_challenges",
        "support_requests",
        "battlepass_levels",
        "battlepass_config",
        "servers",
        "users",
    ];

    for table in tables {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }

    Ok(())
}

async fn create_user_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            discord_id TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL,
            email TEXT,
            avatar_url TEXT,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_server_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS servers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            map TEXT NOT NULL,
            description TEXT NOT NULL,
            multiplier TEXT NOT NULL,
            features TEXT,
            connection_info TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_battlepass_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS battlepass_config (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            season_name TEXT NOT NULL DEFAULT 'Genesis',
            days_left INTEGER NOT NULL DEFAULT 25,
            theme_color TEXT NOT NULL DEFAULT 'tech-blue'
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS battlepass_levels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            level INTEGER NOT NULL,
            free_reward TEXT NOT NULL,
            premium_reward TEXT NOT NULL,
            image_url TEXT,
            free_image_url TEXT,
            premium_image_url TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_support_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS support_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            email TEXT,
            discord_username TEXT,
            category TEXT NOT NULL,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_challenge_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weekly_challenges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            xp_reward INTEGER NOT NULL DEFAULT 100,
            is_active INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_discord_id ON users(discord_id)",
        "CREATE INDEX IF NOT EXISTS idx_battlepass_levels_level ON battlepass_levels(level)",
        "CREATE INDEX IF NOT EXISTS idx_support_requests_status ON support_requests(status)",
        "CREATE INDEX IF NOT EXISTS idx_weekly_challenges_active ON weekly_challenges(is_active)",
    ];

    for index in indexes {
        sqlx::query(index).execute(pool).await?;
    }

    Ok(())
}

/// Seed default content the public site expects when the tables are empty:
/// the two Asylum server cards and a 50-level battlepass track.
async fn seed_default_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let (server_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM servers")
        .fetch_one(pool)
        .await?;

    if server_count == 0 {
        let defaults = [
            (
                "Livonia 101x | ASYLUM\u{2122}",
                "Livonia",
                "High loot, full cars, PvPvE experience in Livonia.",
                "101x",
            ),
            (
                "Chernarus 102x | ASYLUM\u{2122}",
                "Chernarus",
                "Extreme survival with boosted economy.",
                "102x",
            ),
        ];

        for (name, map, description, multiplier) in defaults {
            sqlx::query(
                r#"
                INSERT INTO servers (name, map, description, multiplier, features, connection_info)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(name)
            .bind(map)
            .bind(description)
            .bind(multiplier)
            .bind(r#"["PvPvE","Full cars","Economy"]"#)
            .bind("127.0.0.1:2302")
            .execute(pool)
            .await?;
        }

        info!("Seeded default server list");
    }

    let (level_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM battlepass_levels")
        .fetch_one(pool)
        .await?;

    if level_count == 0 {
        for level in 1..=50 {
            sqlx::query(
                r#"
                INSERT INTO battlepass_levels (level, free_reward, premium_reward)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(level)
            .bind(format!("Level {} Scrap", level))
            .bind(format!("Level {} Tactical Gear", level))
            .execute(pool)
            .await?;
        }

        info!("Seeded 50 battlepass levels");
    }

    Ok(())
}
