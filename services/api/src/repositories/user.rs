//! User repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use super::UserRepository;
use crate::models::user::{NewUser, User, UserChanges};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> DatabaseResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, password_hash,
                   is_mentor, is_student, profile_picture, bio, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash,
                               is_mentor, is_student)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, first_name, last_name, password_hash,
                      is_mentor, is_student, profile_picture, bio, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.password_hash)
        .bind(new_user.is_mentor)
        .bind(new_user.is_student)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_query(e, "username"))
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, password_hash,
                   is_mentor, is_student, profile_picture, bio, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> DatabaseResult<Option<User>> {
        info!("Updating user {}", id);

        // NULL parameters keep the stored column value
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1,
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                is_mentor = COALESCE($5, is_mentor),
                is_student = COALESCE($6, is_student),
                bio = COALESCE($7, bio),
                updated_at = NOW()
            WHERE id = $8
            RETURNING id, username, email, first_name, last_name, password_hash,
                      is_mentor, is_student, profile_picture, bio, created_at, updated_at
            "#,
        )
        .bind(&changes.username)
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.is_mentor)
        .bind(changes.is_student)
        .bind(changes.bio.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_query(e, "username"))
    }
}
