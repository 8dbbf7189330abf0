//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{
    InMemoryMentorRepository, InMemoryUserRepository, MentorRepository, PgMentorRepository,
    PgUserRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present only when running against PostgreSQL
    pub db_pool: Option<PgPool>,
    pub user_repository: Arc<dyn UserRepository>,
    pub mentor_repository: Arc<dyn MentorRepository>,
}

impl AppState {
    /// State backed by a PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            user_repository: Arc::new(PgUserRepository::new(pool.clone())),
            mentor_repository: Arc::new(PgMentorRepository::new(pool.clone())),
            db_pool: Some(pool),
        }
    }

    /// State backed by empty in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            db_pool: None,
            user_repository: Arc::new(InMemoryUserRepository::new()),
            mentor_repository: Arc::new(InMemoryMentorRepository::new()),
        }
    }

    /// Whether the backing store currently answers
    pub async fn store_is_healthy(&self) -> bool {
        match &self.db_pool {
            Some(pool) => common::database::health_check(pool).await,
            None => true,
        }
    }
}
