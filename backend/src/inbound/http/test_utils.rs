//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{AccountPersistenceError, AccountRepository, NewAccount};
use crate::domain::{
    AccountService, Email, Profile, ProfileGraph, TokenIssuer, User, UserPatch, Username,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

#[derive(Clone)]
struct Record {
    user: User,
    graph: ProfileGraph,
}

/// In-memory [`AccountRepository`] double enforcing the same uniqueness
/// rules as the database schema.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    records: Mutex<Vec<Record>>,
}

impl InMemoryAccountRepository {
    fn check_unique(
        records: &[Record],
        username: Option<&Username>,
        email: Option<&Email>,
        except: Option<Uuid>,
    ) -> Result<(), AccountPersistenceError> {
        for record in records {
            if Some(record.user.id) == except {
                continue;
            }
            if username.is_some_and(|u| u == &record.user.username) {
                return Err(AccountPersistenceError::duplicate("username"));
            }
            if email.is_some_and(|e| e == &record.user.email) {
                return Err(AccountPersistenceError::duplicate("email"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_user(&self, account: NewAccount) -> Result<User, AccountPersistenceError> {
        let mut records = self.records.lock().expect("repository lock");
        Self::check_unique(&records, Some(&account.username), Some(&account.email), None)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            is_active: true,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
            created_at: now,
            updated_at: now,
        };
        records.push(Record {
            user: user.clone(),
            graph: ProfileGraph::provisioned(now),
        });
        Ok(user)
    }

    async fn find_user_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(User, Profile)>, AccountPersistenceError> {
        let records = self.records.lock().expect("repository lock");
        Ok(records
            .iter()
            .find(|record| record.user.id == id)
            .map(|record| (record.user.clone(), record.graph.profile.clone())))
    }

    async fn find_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, AccountPersistenceError> {
        let records = self.records.lock().expect("repository lock");
        Ok(records
            .iter()
            .find(|record| &record.user.email == email)
            .map(|record| record.user.clone()))
    }

    async fn find_graph_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, ProfileGraph)>, AccountPersistenceError> {
        let records = self.records.lock().expect("repository lock");
        Ok(records
            .iter()
            .find(|record| &record.user.username == username)
            .map(|record| (record.user.clone(), record.graph.clone())))
    }

    async fn update_user(
        &self,
        id: Uuid,
        patch: UserPatch,
    ) -> Result<Option<(User, Profile)>, AccountPersistenceError> {
        let mut records = self.records.lock().expect("repository lock");
        Self::check_unique(
            &records,
            patch.username.as_ref(),
            patch.email.as_ref(),
            Some(id),
        )?;
        let Some(record) = records.iter_mut().find(|record| record.user.id == id) else {
            return Ok(None);
        };
        let now = Utc::now();
        if let Some(username) = patch.username {
            record.user.username = username;
            record.user.updated_at = now;
        }
        if let Some(email) = patch.email {
            record.user.email = email;
            record.user.updated_at = now;
        }
        if let Some(hash) = patch.password_hash {
            record.user.password_hash = hash;
            record.user.updated_at = now;
        }
        if let Some(bio) = patch.bio {
            record.graph.profile.bio = bio;
            record.graph.profile.updated_at = now;
        }
        if let Some(image) = patch.image {
            record.graph.profile.image = image;
            record.graph.profile.updated_at = now;
        }
        Ok(Some((record.user.clone(), record.graph.profile.clone())))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AccountPersistenceError> {
        let mut records = self.records.lock().expect("repository lock");
        let before = records.len();
        records.retain(|record| record.user.id != id);
        Ok(records.len() < before)
    }
}

/// Build handler state over the in-memory repository with a fixed test
/// signing secret.
pub fn test_state() -> web::Data<HttpState> {
    let repo = Arc::new(InMemoryAccountRepository::default());
    let service = AccountService::new(repo, TokenIssuer::new(b"test-signing-secret"));
    web::Data::new(HttpState::new(Arc::new(service)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_IMAGE_URL, PasswordHash};

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount::registration(
            Username::new(username).expect("valid username"),
            Email::new(email).expect("valid email"),
            PasswordHash::from_stored("$argon2id$stub"),
        )
    }

    #[tokio::test]
    async fn create_user_provisions_one_of_each_graph_record() {
        let repo = InMemoryAccountRepository::default();
        let user = repo
            .create_user(new_account("ada", "ada@example.com"))
            .await
            .expect("create succeeds");

        let (_, graph) = repo
            .find_graph_by_username(&user.username)
            .await
            .expect("lookup succeeds")
            .expect("graph exists");
        assert_eq!(graph.profile.image, DEFAULT_IMAGE_URL);
        assert_eq!(graph.experience.len(), 1);
        assert_eq!(graph.education.len(), 1);
        assert_eq!(graph.skills.len(), 1);
        assert_eq!(graph.projects.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_user_and_its_graph() {
        let repo = InMemoryAccountRepository::default();
        let user = repo
            .create_user(new_account("ada", "ada@example.com"))
            .await
            .expect("create succeeds");

        assert!(repo.delete_user(user.id).await.expect("delete succeeds"));
        assert!(
            repo.find_graph_by_username(&user.username)
                .await
                .expect("lookup succeeds")
                .is_none()
        );
        assert!(!repo.delete_user(user.id).await.expect("second delete"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_without_a_row() {
        let repo = InMemoryAccountRepository::default();
        repo.create_user(new_account("ada", "ada@example.com"))
            .await
            .expect("create succeeds");

        let error = repo
            .create_user(new_account("ada", "other@example.com"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(error, AccountPersistenceError::duplicate("username"));
        assert!(
            repo.find_user_by_email(&Email::new("other@example.com").expect("valid email"))
                .await
                .expect("lookup succeeds")
                .is_none()
        );
    }
}
