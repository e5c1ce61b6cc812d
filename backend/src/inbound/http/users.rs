//! Account API handlers.
//!
//! ```text
//! POST  /api/users        {"username":"jake","email":"jake@jake.jake","password":"jakejake1"}
//! POST  /api/users/login  {"email":"jake@jake.jake","password":"jakejake1"}
//! GET   /api/user         Authorization: Token <jwt>
//! PATCH /api/user         Authorization: Token <jwt>
//! ```
//!
//! Responses wrap the account representation under a `user` key.

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{AccountUpdate, AuthenticatedAccount, Credentials, RegisterAccount};
use crate::domain::{
    Email, Error, Password, PasswordValidationError, Profile, User, UserValidationError, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body for `POST /api/users/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial update body for `PATCH /api/user`. Absent fields are untouched.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Account representation returned by register and login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthUserBody {
    pub email: String,
    pub username: String,
    pub token: String,
}

/// Envelope for authentication responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub user: AuthUserBody,
}

impl From<AuthenticatedAccount> for AuthResponse {
    fn from(account: AuthenticatedAccount) -> Self {
        Self {
            user: AuthUserBody {
                email: account.user.email.as_str().to_owned(),
                username: account.user.username.as_str().to_owned(),
                token: account.token,
            },
        }
    }
}

/// Account representation returned by the current-user endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserBody {
    pub email: String,
    pub username: String,
    pub bio: String,
    pub image: String,
}

/// Envelope for current-user responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub user: UserBody,
}

impl From<(User, Profile)> for UserResponse {
    fn from((user, profile): (User, Profile)) -> Self {
        Self {
            user: UserBody {
                email: user.email.as_str().to_owned(),
                username: user.username.as_str().to_owned(),
                bio: profile.bio,
                image: profile.image,
            },
        }
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyUsername
        | UserValidationError::UsernameTooLong
        | UserValidationError::UsernameInvalidCharacters => "username",
        UserValidationError::EmptyEmail
        | UserValidationError::EmailTooLong
        | UserValidationError::InvalidEmail => "email",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn map_password_validation_error(err: PasswordValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "password" }))
}

/// Register a new account and issue an identity token.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid or duplicate field", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let request = RegisterAccount {
        username: Username::new(payload.username).map_err(map_user_validation_error)?,
        email: Email::new(payload.email).map_err(map_user_validation_error)?,
        password: Password::new(payload.password).map_err(map_password_validation_error)?,
    };
    let account = state.accounts.register(request).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(account)))
}

/// Authenticate credentials, establish a session, and issue a token.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials {
        email: Email::new(payload.email).map_err(map_user_validation_error)?,
        password: Password::new(payload.password).map_err(map_password_validation_error)?,
    };
    let account = state.accounts.login(credentials).await?;
    session.persist_user(account.user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse::from(account)))
}

/// Fetch the acting user's account.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserResponse>> {
    let pair = state.accounts.current_user(user.0).await?;
    Ok(web::Json(UserResponse::from(pair)))
}

/// Merge a partial update into the acting user's account.
#[utoipa::path(
    patch,
    path = "/api/user",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = UserResponse),
        (status = 400, description = "Invalid or duplicate field", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/user")]
pub async fn update_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let payload = payload.into_inner();
    let update = AccountUpdate {
        username: payload
            .username
            .map(Username::new)
            .transpose()
            .map_err(map_user_validation_error)?,
        email: payload
            .email
            .map(Email::new)
            .transpose()
            .map_err(map_user_validation_error)?,
        password: payload
            .password
            .map(Password::new)
            .transpose()
            .map_err(map_password_validation_error)?,
        bio: payload.bio,
        image: payload.image,
    };
    let pair = state.accounts.update_user(user.0, update).await?;
    Ok(web::Json(UserResponse::from(pair)))
}
