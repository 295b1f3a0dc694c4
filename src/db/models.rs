use serde::{Deserialize, Serialize};

/// Stored user. Only `disabled` may change after creation. Never serialized;
/// render [`UserProfile`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
    pub password_hash: String,
}

impl UserRecord {
    pub fn new(
        username: String,
        password_hash: String,
        email: Option<String>,
        full_name: Option<String>,
    ) -> Self {
        Self {
            username,
            email,
            full_name,
            disabled: false,
            password_hash,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// What a client may see of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
}

impl From<&UserRecord> for UserProfile {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone(),
            full_name: record.full_name.clone(),
            disabled: record.disabled,
        }
    }
}
