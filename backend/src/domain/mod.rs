//! Domain model: entities, value objects, ports and account use-cases.
//!
//! Everything in here is transport and storage agnostic. The HTTP adapter
//! lives in `inbound::http`, persistence in `outbound::persistence`.

pub mod accounts;
pub mod error;
pub mod password;
pub mod ports;
pub mod profile;
pub mod token;
pub mod user;

pub use self::accounts::{AccountService, CREDENTIALS_NOT_FOUND, PROFILE_NOT_FOUND};
pub use self::error::{Error, ErrorCode};
pub use self::password::{Password, PasswordHash, PasswordValidationError};
pub use self::profile::{
    Basic, Education, Experience, IndianState, Profile, ProfileGraph, Project, ProjectType, Skill,
    DEFAULT_IMAGE_URL,
};
pub use self::token::{TokenIssuer, TOKEN_VALIDITY_DAYS};
pub use self::user::{Email, User, UserPatch, UserValidationError, Username};
