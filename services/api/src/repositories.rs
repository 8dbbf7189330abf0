//! Repositories for database operations
//!
//! Handlers only see the traits below; `AppState` decides whether a
//! PostgreSQL or an in-memory implementation sits behind them.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{
    mentor::{Mentor, MentorFields},
    user::{NewUser, User, UserChanges},
};

pub mod memory;
pub mod mentor;
pub mod user;

pub use memory::{InMemoryMentorRepository, InMemoryUserRepository};
pub use mentor::PgMentorRepository;
pub use user::PgUserRepository;

/// Store operations on the mentor directory
#[async_trait]
pub trait MentorRepository: Send + Sync {
    /// All mentors in ascending id order
    async fn list(&self) -> DatabaseResult<Vec<Mentor>>;

    /// Insert a mentor, assigning its id and timestamps
    async fn create(&self, fields: &MentorFields) -> DatabaseResult<Mentor>;

    /// Find a mentor by ID
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Mentor>>;

    /// Overwrite every mutable field; `None` when the mentor does not exist
    async fn replace(&self, id: i64, fields: &MentorFields) -> DatabaseResult<Option<Mentor>>;

    /// Delete a mentor; `false` when nothing was removed
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Store operations on user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in ascending id order
    async fn list(&self) -> DatabaseResult<Vec<User>>;

    /// Insert a user; a taken username yields `DatabaseError::Conflict`
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>>;

    /// Merge a profile edit; `None` when the user does not exist
    async fn update(&self, id: i64, changes: &UserChanges) -> DatabaseResult<Option<User>>;
}
