//! PostgreSQL persistence adapters.

pub mod diesel_account_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
