//! Authentication module for the signal server
//!
//! Password hashing, session token issuance/validation and the
//! `ActiveUser` request guard used by protected routes.

mod extractor;
pub mod handlers;
mod password;
mod service;
mod token;

pub use extractor::ActiveUser;
pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{Claims, TokenService};
