//! Token authentication for HTTP handlers.
//!
//! Clients authenticate with an `Authorization: Token <jwt>` header. The
//! `Bearer` scheme is accepted as an alias so standard HTTP tooling works
//! unchanged.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::domain::Error;
use crate::inbound::http::state::HttpState;

const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";

/// Pull the bearer token out of the `Authorization` header, if any.
///
/// Returns an error when the header is present but malformed (wrong scheme,
/// non-ASCII bytes, or an empty token).
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<Option<&str>, Error> {
    let Some(value) = req.headers().get(actix_web::http::header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized("Invalid authorization header."))?;
    let token = value
        .strip_prefix("Token ")
        .or_else(|| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Invalid authorization header."))?;
    Ok(Some(token))
}

/// Extractor yielding the user id of a token-authenticated request.
///
/// Rejects with `401 Unauthorized` when the header is missing, malformed, or
/// carries a token that fails verification.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let token =
        bearer_token(req)?.ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS))?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HttpState missing from app data"))?;
    let user_id = state.accounts.verify_token(token)?;
    Ok(AuthenticatedUser(user_id))
}
