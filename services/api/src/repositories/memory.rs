//! In-memory repositories.
//!
//! Used when the service runs with `MENTORLINK_STORAGE=memory` and by the
//! router tests. Ids are assigned sequentially from 1 and never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{MentorRepository, UserRepository};
use crate::models::{
    mentor::{Mentor, MentorFields},
    user::{NewUser, User, UserChanges},
};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory mentor directory
#[derive(Debug, Default)]
pub struct InMemoryMentorRepository {
    table: RwLock<Table<Mentor>>,
}

impl InMemoryMentorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MentorRepository for InMemoryMentorRepository {
    async fn list(&self) -> DatabaseResult<Vec<Mentor>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, fields: &MentorFields) -> DatabaseResult<Mentor> {
        let mut table = self.table.write().await;
        let now = Utc::now();
        let mentor = Mentor {
            id: table.next_id(),
            name: fields.name.clone(),
            expertise: fields.expertise.clone(),
            bio: fields.bio.clone(),
            email: fields.email.clone(),
            created_at: now,
            updated_at: now,
        };

        table.rows.insert(mentor.id, mentor.clone());
        info!("Created mentor {} in memory", mentor.id);
        Ok(mentor)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Mentor>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn replace(&self, id: i64, fields: &MentorFields) -> DatabaseResult<Option<Mentor>> {
        let mut table = self.table.write().await;
        let Some(mentor) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        mentor.apply(fields.clone(), Utc::now());
        info!("Replaced mentor {} in memory", id);
        Ok(Some(mentor.clone()))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut table = self.table.write().await;
        let removed = table.rows.remove(&id).is_some();
        if removed {
            info!("Deleted mentor {} from memory", id);
        }
        Ok(removed)
    }
}

/// In-memory user accounts with the same username uniqueness as the database
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn username_taken(table: &Table<User>, username: &str, except: Option<i64>) -> bool {
    table
        .rows
        .values()
        .any(|user| user.username == username && Some(user.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> DatabaseResult<Vec<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut table = self.table.write().await;
        if username_taken(&table, &new_user.username, None) {
            debug!("Username already taken: {}", new_user.username);
            return Err(DatabaseError::Conflict("username".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: table.next_id(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            password_hash: new_user.password_hash.clone(),
            is_mentor: new_user.is_mentor,
            is_student: new_user.is_student,
            profile_picture: None,
            bio: String::new(),
            created_at: now,
            updated_at: now,
        };

        table.rows.insert(user.id, user.clone());
        info!("Created user {} in memory", user.id);
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> DatabaseResult<Option<User>> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if username_taken(&table, &changes.username, Some(id)) {
            return Err(DatabaseError::Conflict("username".to_string()));
        }

        let Some(user) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        user.apply(changes.clone(), Utc::now());
        info!("Updated user {} in memory", id);
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> MentorFields {
        MentorFields {
            name: name.to_string(),
            expertise: "Systems".to_string(),
            bio: "...".to_string(),
            email: "mentor@example.com".to_string(),
        }
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: "hash".to_string(),
            is_mentor: false,
            is_student: true,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = InMemoryMentorRepository::new();

        let first = repo.create(&fields("Ada")).await.unwrap();
        let second = repo.create(&fields("Grace")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert!(repo.delete(second.id).await.unwrap());
        let third = repo.create(&fields("Barbara")).await.unwrap();
        assert_eq!(third.id, 3);

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Barbara"]);
    }

    #[tokio::test]
    async fn missing_mentor_operations_report_absence() {
        let repo = InMemoryMentorRepository::new();

        assert_eq!(repo.find_by_id(42).await.unwrap(), None);
        assert_eq!(repo.replace(42, &fields("Ada")).await.unwrap(), None);
        assert!(!repo.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn replace_keeps_created_at() {
        let repo = InMemoryMentorRepository::new();
        let created = repo.create(&fields("Ada")).await.unwrap();

        let replaced = repo
            .replace(created.id, &fields("Ada L."))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.name, "Ada L.");
        assert_eq!(replaced.created_at, created.created_at);
        assert!(replaced.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn duplicate_usernames_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(&new_user("ada")).await.unwrap();

        let result = repo.create(&new_user("ada")).await;
        assert!(matches!(result, Err(DatabaseError::Conflict(column)) if column == "username"));
    }

    #[tokio::test]
    async fn update_may_keep_own_username_but_not_take_another() {
        let repo = InMemoryUserRepository::new();
        let ada = repo.create(&new_user("ada")).await.unwrap();
        repo.create(&new_user("grace")).await.unwrap();

        let keep = UserChanges {
            username: "ada".to_string(),
            bio: Some("Analyst".to_string()),
            ..Default::default()
        };
        let updated = repo.update(ada.id, &keep).await.unwrap().unwrap();
        assert_eq!(updated.bio, "Analyst");

        let steal = UserChanges {
            username: "grace".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(ada.id, &steal).await,
            Err(DatabaseError::Conflict(_))
        ));
        assert_eq!(repo.update(99, &keep).await.unwrap(), None);
    }
}
