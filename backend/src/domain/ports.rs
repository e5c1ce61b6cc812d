//! Ports at the edges of the domain.
//!
//! [`AccountRepository`] is the driven port implemented by the persistence
//! adapter; [`Accounts`] is the driving port HTTP handlers call so they can
//! substitute a test double instead of wiring a database.

use async_trait::async_trait;
use thiserror::Error as ThisError;
use uuid::Uuid;

use super::password::{Password, PasswordHash};
use super::profile::{Profile, ProfileGraph};
use super::user::{Email, User, UserPatch, Username};
use super::Error;

/// Persistence errors raised by account repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AccountPersistenceError {
    /// Repository connection could not be established.
    #[error("account repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("account repository query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// A unique constraint rejected the write.
    #[error("duplicate value for {field}")]
    Duplicate {
        /// Offending column: `username` or `email`.
        field: String,
    },
}

impl AccountPersistenceError {
    /// Helper for connection-level adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint violations.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }
}

/// Validated input for inserting a new account row.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Unique username.
    pub username: Username,
    /// Unique login email.
    pub email: Email,
    /// Already-hashed credential.
    pub password_hash: PasswordHash,
    /// Staff flag; false for self-service registration.
    pub is_staff: bool,
    /// Superuser flag; false for self-service registration.
    pub is_superuser: bool,
}

impl NewAccount {
    /// Standard self-service registration payload.
    pub fn registration(username: Username, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            username,
            email,
            password_hash,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Administrative account payload with staff and superuser set.
    pub fn superuser(username: Username, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            username,
            email,
            password_hash,
            is_staff: true,
            is_superuser: true,
        }
    }
}

/// Driven port for account persistence.
///
/// `create_user` must insert the user row AND provision the default profile
/// graph atomically: a failure anywhere rolls back the whole registration so
/// no user exists without its dependent rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a user and its provisioned profile graph in one transaction.
    async fn create_user(&self, account: NewAccount) -> Result<User, AccountPersistenceError>;

    /// Fetch a user and its profile by identifier.
    async fn find_user_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(User, Profile)>, AccountPersistenceError>;

    /// Fetch a user by login email.
    async fn find_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, AccountPersistenceError>;

    /// Fetch a user and its full profile graph by username.
    async fn find_graph_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, ProfileGraph)>, AccountPersistenceError>;

    /// Apply a patch to the user and profile rows, refreshing `updated_at`.
    /// Returns `None` when the user no longer exists.
    async fn update_user(
        &self,
        id: Uuid,
        patch: UserPatch,
    ) -> Result<Option<(User, Profile)>, AccountPersistenceError>;

    /// Delete a user; the database cascades the profile graph. Returns
    /// whether a row was removed.
    async fn delete_user(&self, id: Uuid) -> Result<bool, AccountPersistenceError>;
}

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct RegisterAccount {
    /// Requested username.
    pub username: Username,
    /// Requested login email.
    pub email: Email,
    /// Plaintext password, hashed by the service.
    pub password: Password,
}

/// Validated login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Login email.
    pub email: Email,
    /// Plaintext password.
    pub password: Password,
}

/// Patch accepted by the account update use-case.
///
/// Unlike [`UserPatch`] this still carries the plaintext password; the
/// service re-hashes it before anything reaches persistence.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// Replacement username.
    pub username: Option<Username>,
    /// Replacement email.
    pub email: Option<Email>,
    /// Replacement password.
    pub password: Option<Password>,
    /// Replacement profile bio.
    pub bio: Option<String>,
    /// Replacement profile image URL.
    pub image: Option<String>,
}

/// A user together with a freshly issued identity token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    /// The authenticated user.
    pub user: User,
    /// Signed identity token for subsequent requests.
    pub token: String,
}

/// Driving port for the account use-cases exposed over HTTP.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new account, provisioning its profile graph, and issue a
    /// token.
    async fn register(&self, request: RegisterAccount) -> Result<AuthenticatedAccount, Error>;

    /// Provision an administrative account with the staff and superuser
    /// flags set. No token is issued; operators log in like everyone else.
    async fn create_superuser(&self, request: RegisterAccount) -> Result<User, Error>;

    /// Authenticate credentials and issue a token.
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedAccount, Error>;

    /// Fetch the acting user's account and profile.
    async fn current_user(&self, user_id: Uuid) -> Result<(User, Profile), Error>;

    /// Merge a partial update into the acting user's account and profile.
    async fn update_user(
        &self,
        user_id: Uuid,
        update: AccountUpdate,
    ) -> Result<(User, Profile), Error>;

    /// Fetch the full profile graph for the acting user.
    async fn profile_of(&self, user_id: Uuid) -> Result<(User, ProfileGraph), Error>;

    /// Administrative removal of an account and its graph.
    async fn delete_account(&self, user_id: Uuid) -> Result<(), Error>;

    /// Verify a token and return the embedded user id.
    fn verify_token(&self, token: &str) -> Result<Uuid, Error>;

    /// Verify a token and mint a fresh one for the same user.
    fn refresh_token(&self, token: &str) -> Result<String, Error>;
}
