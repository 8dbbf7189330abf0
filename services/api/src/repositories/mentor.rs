//! Mentor repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use super::MentorRepository;
use crate::models::mentor::{Mentor, MentorFields};

/// PostgreSQL-backed mentor repository
#[derive(Clone)]
pub struct PgMentorRepository {
    pool: PgPool,
}

impl PgMentorRepository {
    /// Create a new mentor repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MentorRepository for PgMentorRepository {
    async fn list(&self) -> DatabaseResult<Vec<Mentor>> {
        sqlx::query_as::<_, Mentor>(
            r#"
            SELECT id, name, expertise, bio, email, created_at, updated_at
            FROM mentors
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn create(&self, fields: &MentorFields) -> DatabaseResult<Mentor> {
        info!("Creating mentor: {}", fields.name);

        sqlx::query_as::<_, Mentor>(
            r#"
            INSERT INTO mentors (name, expertise, bio, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, name, expertise, bio, email, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.expertise)
        .bind(&fields.bio)
        .bind(&fields.email)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Mentor>> {
        sqlx::query_as::<_, Mentor>(
            r#"
            SELECT id, name, expertise, bio, email, created_at, updated_at
            FROM mentors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn replace(&self, id: i64, fields: &MentorFields) -> DatabaseResult<Option<Mentor>> {
        info!("Replacing mentor {}", id);

        sqlx::query_as::<_, Mentor>(
            r#"
            UPDATE mentors
            SET name = $1, expertise = $2, bio = $3, email = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, expertise, bio, email, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.expertise)
        .bind(&fields.bio)
        .bind(&fields.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        info!("Deleting mentor {}", id);

        let result = sqlx::query("DELETE FROM mentors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
