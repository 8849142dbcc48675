//! Cats Service - account signup over HTTP.
//!
//! `POST /cats` registers an account keyed by email:
//! - Rejects an email that is already registered
//! - Stores only a bcrypt hash of the password
//! - Returns the account without its credential

pub mod api;
pub mod config;
pub mod error;
pub mod registration;

pub use config::Config;
pub use error::ServiceError;
pub use registration::{AccountRegistrationRequest, RegistrationService, RegistrationSettings};
