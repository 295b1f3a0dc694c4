//! User storage for the signal server.
//!
//! The auth layer only talks to [`UserRepository`]; the in-process
//! [`InMemoryUserDirectory`] is the sole backend shipped today and lives
//! as long as the process does.

pub mod directory;
pub mod models;

pub use directory::{InMemoryUserDirectory, UserRepository};
pub use models::{UserProfile, UserRecord};
