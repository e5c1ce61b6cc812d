//! Token API handlers.
//!
//! ```text
//! POST /api/tokens          {"email":"jake@jake.jake","password":"jakejake1"}
//! POST /api/tokens/verify   {"token":"<jwt>"}
//! POST /api/tokens/refresh  {"token":"<jwt>"}
//! ```
//!
//! A bare token surface for clients that manage credentials themselves
//! instead of going through the session-establishing login endpoint.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::Credentials;
use crate::domain::{Email, Error, Password};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::LoginRequest;

/// Request body carrying an existing token.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub token: String,
}

/// Response body carrying a token.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange credentials for a fresh identity token.
#[utoipa::path(
    post,
    path = "/api/tokens",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tokens"],
    operation_id = "obtainToken",
    security([])
)]
#[post("/tokens")]
pub async fn obtain_token(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials {
        email: Email::new(payload.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?,
        password: Password::new(payload.password)
            .map_err(|err| Error::invalid_request(err.to_string()))?,
    };
    let account = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        token: account.token,
    }))
}

/// Check a token's signature and expiry, echoing it back when valid.
#[utoipa::path(
    post,
    path = "/api/tokens/verify",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token is valid", body = TokenResponse),
        (status = 401, description = "Token is invalid or expired", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tokens"],
    operation_id = "verifyToken",
    security([])
)]
#[post("/tokens/verify")]
pub async fn verify_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    state.accounts.verify_token(&payload.token)?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        token: payload.token,
    }))
}

/// Trade a valid token for a new one with a fresh expiry.
#[utoipa::path(
    post,
    path = "/api/tokens/refresh",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Fresh token issued", body = TokenResponse),
        (status = 401, description = "Token is invalid or expired", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tokens"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/tokens/refresh")]
pub async fn refresh_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    let token = state.accounts.refresh_token(&payload.token)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
