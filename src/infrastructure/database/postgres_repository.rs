use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::{Entry, Repository, RepositoryPtr, Section};

#[derive(sqlx::FromRow)]
struct SectionRow {
    section: String,
    content: String,
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: i32,
    title: String,
    content: String,
    created: DateTime<Utc>,
}

pub fn create_postgres_repository(pool: PgPool) -> RepositoryPtr {
    // ---
    Arc::new(PostgresRepository::new(pool))
}

pub struct PostgresRepository {
    // ---
    pool: PgPool,
}

impl PostgresRepository {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Repository for PostgresRepository {
    // ---
    async fn ping(&self) -> Result<()> {
        // ---
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        Ok(())
    }

    async fn seed_sections(&self, sections: &[Section]) -> Result<usize> {
        // ---
        let mut inserted = 0;

        for section in sections {
            let result = sqlx::query(
                "INSERT INTO portfolio (section, content) VALUES ($1, $2)
                 ON CONFLICT (section) DO NOTHING",
            )
            .bind(&section.name)
            .bind(&section.content)
            .execute(&self.pool)
            .await?;

            inserted += result.rows_affected() as usize;
        }

        Ok(inserted)
    }

    async fn list_sections(&self) -> Result<Vec<Section>> {
        // ---
        let rows = sqlx::query_as::<_, SectionRow>(
            "SELECT section, content FROM portfolio ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Section {
                name: r.section,
                content: r.content,
            })
            .collect())
    }

    async fn list_entries(&self, limit: Option<i64>) -> Result<Vec<Entry>> {
        // ---
        // A NULL limit means no limit in PostgreSQL.
        let rows = sqlx::query_as::<_, EntryRow>(
            "SELECT id, title, content, created FROM entries
             ORDER BY created DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Entry {
                id: r.id,
                title: r.title,
                content: r.content,
                created: r.created,
            })
            .collect())
    }
}
