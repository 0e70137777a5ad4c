//! Application state for the forms API

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Duration;
use chrono_tz::Tz;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::delivery::{self, DocumentStore};

pub struct AppState {
    pub db: SqlitePool,
    pub documents: DocumentStore,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub timezone: Tz,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", config.timezone, e))?;

        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("Cannot create output directory {}", config.output_dir.display())
        })?;
        let stale = delivery::clear_stale(&config.output_dir).with_context(|| {
            format!("Cannot clear output directory {}", config.output_dir.display())
        })?;
        if stale > 0 {
            tracing::info!("Removed {} undelivered document(s) from a previous run", stale);
        }
        if !config.templates_dir.is_dir() {
            tracing::warn!(
                "Templates directory {} does not exist",
                config.templates_dir.display()
            );
        }

        tracing::info!("Connecting to database: {}", config.database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_connections)
            .connect(&config.database_url)
            .await?;

        // Run migrations
        Self::run_migrations(&pool).await?;

        Ok(Self {
            db: pool,
            documents: DocumentStore::new(Duration::minutes(i64::from(
                config.document_ttl_minutes,
            ))),
            templates_dir: config.templates_dir.clone(),
            output_dir: config.output_dir.clone(),
            timezone,
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS actas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                makedate TEXT NOT NULL,
                cianame TEXT NOT NULL,
                ciatype TEXT NOT NULL,
                celebdate TEXT NOT NULL,
                accnumber INTEGER NOT NULL,
                primary_group_id INTEGER NOT NULL,
                user_name TEXT NOT NULL,
                accdata TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Listing is always by owning group
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_actas_group ON actas(primary_group_id)
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS alicuotas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                alicuota TEXT NOT NULL,
                info1 TEXT NOT NULL DEFAULT '',
                info2 TEXT NOT NULL DEFAULT '',
                info3 TEXT NOT NULL DEFAULT '',
                info4 TEXT NOT NULL DEFAULT '',
                info5 TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }
}
