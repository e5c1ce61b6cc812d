//! HTTP adapter: handlers, extractors and error mapping.

pub mod auth;
pub mod error;
pub mod health;
pub mod profiles;
pub mod session;
pub mod state;
pub mod tokens;
pub mod users;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;
