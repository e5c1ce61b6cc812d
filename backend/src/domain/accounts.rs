//! Account use-cases: registration, login, self-service updates, profile
//! lookup and administrative deletion.
//!
//! Registration provisions the default profile graph inside the repository's
//! transaction, replacing the original system's post-insert side effect so a
//! failed provision never leaves a user without its dependent rows.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::ports::{
    AccountPersistenceError, AccountRepository, AccountUpdate, Accounts, AuthenticatedAccount,
    Credentials, NewAccount, RegisterAccount,
};
use super::profile::{Profile, ProfileGraph};
use super::token::TokenIssuer;
use super::user::{User, UserPatch};
use super::Error;

/// Generic credential failure message. Deliberately identical for unknown
/// email, wrong password and deactivated accounts so responses never confirm
/// that an address is registered.
pub const CREDENTIALS_NOT_FOUND: &str = "A user with this email and password was not found.";

/// Fixed message for profile lookup misses.
pub const PROFILE_NOT_FOUND: &str = "The requested profile does not exist.";

/// Account service implementing the [`Accounts`] driving port.
#[derive(Clone)]
pub struct AccountService<R> {
    repo: Arc<R>,
    tokens: TokenIssuer,
}

impl<R> AccountService<R> {
    /// Create a service over the given repository and token issuer.
    pub fn new(repo: Arc<R>, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }
}

fn map_persistence_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountPersistenceError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountPersistenceError::Duplicate { field } => {
            Error::invalid_request(format!("A user with this {field} already exists."))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    async fn fetch_by_id(&self, user_id: Uuid) -> Result<(User, Profile), Error> {
        self.repo
            .find_user_by_id(user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("User not found."))
    }
}

#[async_trait]
impl<R> Accounts for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, request: RegisterAccount) -> Result<AuthenticatedAccount, Error> {
        let password_hash = hash_password(&request.password)?;
        let account = NewAccount::registration(request.username, request.email, password_hash);
        let user = self
            .repo
            .create_user(account)
            .await
            .map_err(map_persistence_error)?;
        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, username = %user.username, "registered new account");
        Ok(AuthenticatedAccount { user, token })
    }

    async fn create_superuser(&self, request: RegisterAccount) -> Result<User, Error> {
        let password_hash = hash_password(&request.password)?;
        let account = NewAccount::superuser(request.username, request.email, password_hash);
        let user = self
            .repo
            .create_user(account)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id, username = %user.username, "created superuser account");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedAccount, Error> {
        let found = self
            .repo
            .find_user_by_email(&credentials.email)
            .await
            .map_err(map_persistence_error)?;

        let Some(user) = found else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(CREDENTIALS_NOT_FOUND));
        };
        if !verify_password(&credentials.password, &user.password_hash) {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(CREDENTIALS_NOT_FOUND));
        }
        // Same outward message as a miss; a deactivated account must not be
        // distinguishable from a nonexistent one.
        if !user.is_active {
            debug!(user_id = %user.id, "login rejected: account deactivated");
            return Err(Error::unauthorized(CREDENTIALS_NOT_FOUND));
        }

        let token = self.tokens.issue(user.id)?;
        Ok(AuthenticatedAccount { user, token })
    }

    async fn current_user(&self, user_id: Uuid) -> Result<(User, Profile), Error> {
        self.fetch_by_id(user_id).await
    }

    async fn update_user(
        &self,
        user_id: Uuid,
        update: AccountUpdate,
    ) -> Result<(User, Profile), Error> {
        let password_hash = match &update.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };
        let patch = UserPatch {
            username: update.username,
            email: update.email,
            password_hash,
            bio: update.bio,
            image: update.image,
        };
        if patch.is_empty() {
            // No-op patch: return the current representation unchanged.
            return self.fetch_by_id(user_id).await;
        }
        self.repo
            .update_user(user_id, patch)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("User not found."))
    }

    async fn profile_of(&self, user_id: Uuid) -> Result<(User, ProfileGraph), Error> {
        let (user, _) = self
            .repo
            .find_user_by_id(user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND))?;
        self.repo
            .find_graph_by_username(&user.username)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND))
    }

    async fn delete_account(&self, user_id: Uuid) -> Result<(), Error> {
        let removed = self
            .repo
            .delete_user(user_id)
            .await
            .map_err(map_persistence_error)?;
        if removed {
            info!(%user_id, "deleted account and profile graph");
            Ok(())
        } else {
            Err(Error::not_found("User not found."))
        }
    }

    fn verify_token(&self, token: &str) -> Result<Uuid, Error> {
        self.tokens.verify(token)
    }

    fn refresh_token(&self, token: &str) -> Result<String, Error> {
        self.tokens.refresh(token)
    }
}
