use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenService;
use crate::db::{UserProfile, UserRecord, UserRepository};
use crate::error::{AppError, AuthError};
use crate::Result;

/// Credential checks, session issuance and user resolution for the API.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<UserProfile> {
        if username.is_empty() {
            return Err(AppError::ValidationError("username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(AppError::ValidationError("password must not be empty".into()));
        }

        let hasher = self.hasher;
        let plain = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&plain)).await??;

        let record = UserRecord::new(
            username.to_string(),
            password_hash,
            non_empty(email),
            non_empty(full_name),
        );
        let profile = record.profile();
        self.users.create(record).await?;

        info!("Created user {}", username);
        Ok(profile)
    }

    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord> {
        let user = match self.users.get(username).await? {
            Some(user) => user,
            None => {
                warn!("Authentication failed for {}", username);
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let hasher = self.hasher;
        let plain = password.to_string();
        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&plain, &stored)).await?;

        if !matches {
            warn!("Authentication failed for {}", username);
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let user = self.authenticate(username, password).await?;
        let token = self.tokens.issue_default(&user.username)?;
        info!("Issued session token for {}", user.username);
        Ok(token)
    }

    /// Resolves a bearer token to its user. The user must still exist.
    pub async fn current_user(&self, token: &str) -> Result<UserRecord> {
        let subject = self
            .tokens
            .validate(token)
            .map_err(|_| AuthError::Unauthorized)?;

        self.users
            .get(&subject)
            .await?
            .ok_or_else(|| {
                warn!("Token subject {} is not a known user", subject);
                AuthError::Unauthorized.into()
            })
    }

    pub fn require_active(&self, user: UserRecord) -> Result<UserRecord> {
        if user.disabled {
            warn!("Rejected request from inactive user {}", user.username);
            return Err(AuthError::InactiveUser.into());
        }
        Ok(user)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::directory::MockUserRepository;
    use crate::db::InMemoryUserDirectory;
    use crate::error::StoreError;
    use chrono::Duration;

    fn tokens() -> TokenService {
        TokenService::new("test_secret", Duration::minutes(30))
    }

    fn service_with(dir: Arc<InMemoryUserDirectory>) -> AuthService {
        AuthService::new(dir, tokens())
    }

    fn auth_err(err: AppError) -> AuthError {
        match err {
            AppError::AuthError(e) => e,
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let svc = service_with(Arc::new(InMemoryUserDirectory::new()));

        let profile = svc
            .signup("alice", "s3cret", Some("alice@example.com"), None)
            .await
            .unwrap();
        assert_eq!(profile.username, "alice");
        assert!(!profile.disabled);

        let token = svc.login("alice", "s3cret").await.unwrap();
        assert_eq!(svc.tokens().validate(&token).unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_password() {
        let dir = Arc::new(InMemoryUserDirectory::new());
        let svc = service_with(dir.clone());
        svc.signup("alice", "s3cret", None, None).await.unwrap();

        let stored = dir.get("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret");
        assert!(PasswordHasher::new().verify("s3cret", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_signup_drops_empty_optionals() {
        let svc = service_with(Arc::new(InMemoryUserDirectory::new()));
        let profile = svc.signup("alice", "pw", Some(""), Some("")).await.unwrap();
        assert_eq!(profile.email, None);
        assert_eq!(profile.full_name, None);
    }

    #[tokio::test]
    async fn test_signup_rejects_empty_fields() {
        let svc = service_with(Arc::new(InMemoryUserDirectory::new()));
        assert!(matches!(
            svc.signup("", "pw", None, None).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            svc.signup("alice", "", None, None).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_signup_keeps_first_record() {
        let dir = Arc::new(InMemoryUserDirectory::new());
        let svc = service_with(dir.clone());
        svc.signup("alice", "first", Some("a@example.com"), None).await.unwrap();

        let err = svc.signup("alice", "second", Some("b@example.com"), None).await.unwrap_err();
        assert!(matches!(err, AppError::StoreError(StoreError::DuplicateUser(_))));

        let stored = dir.get("alice").await.unwrap().unwrap();
        assert_eq!(stored.email.as_deref(), Some("a@example.com"));
        assert!(svc.authenticate("alice", "first").await.is_ok());
        assert!(svc.authenticate("alice", "second").await.is_err());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail_identically() {
        let svc = service_with(Arc::new(InMemoryUserDirectory::new()));
        svc.signup("alice", "s3cret", None, None).await.unwrap();

        let wrong_password = svc.login("alice", "nope").await.unwrap_err();
        let unknown_user = svc.login("mallory", "s3cret").await.unwrap_err();

        assert_eq!(auth_err(wrong_password), AuthError::InvalidCredentials);
        assert_eq!(auth_err(unknown_user), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_current_user_resolves_subject() {
        let svc = service_with(Arc::new(InMemoryUserDirectory::new()));
        svc.signup("alice", "s3cret", None, Some("Alice")).await.unwrap();
        let token = svc.login("alice", "s3cret").await.unwrap();

        let user = svc.current_user(&token).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.full_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_current_user_rejects_expired_token() {
        let svc = service_with(Arc::new(InMemoryUserDirectory::new()));
        svc.signup("alice", "s3cret", None, None).await.unwrap();
        let token = svc.tokens().issue("alice", Duration::seconds(-1)).unwrap();

        let err = svc.current_user(&token).await.unwrap_err();
        assert_eq!(auth_err(err), AuthError::Unauthorized);
    }

    #[tokio::test]
    async fn test_current_user_rejects_unknown_subject() {
        let svc = service_with(Arc::new(InMemoryUserDirectory::new()));
        let token = svc.tokens().issue_default("ghost").unwrap();

        let err = svc.current_user(&token).await.unwrap_err();
        assert_eq!(auth_err(err), AuthError::Unauthorized);
    }

    #[tokio::test]
    async fn test_require_active() {
        let dir = Arc::new(InMemoryUserDirectory::new());
        let svc = service_with(dir.clone());
        svc.signup("alice", "s3cret", None, None).await.unwrap();

        let user = dir.get("alice").await.unwrap().unwrap();
        assert!(svc.require_active(user).is_ok());

        dir.set_disabled("alice", true).await;
        let user = dir.get("alice").await.unwrap().unwrap();
        let err = svc.require_active(user).unwrap_err();
        assert_eq!(auth_err(err), AuthError::InactiveUser);
    }

    #[tokio::test]
    async fn test_login_with_corrupt_stored_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|_| {
                Ok(Some(UserRecord::new("alice".into(), "corrupt".into(), None, None)))
            });

        let svc = AuthService::new(Arc::new(repo), tokens());
        let err = svc.login("alice", "anything").await.unwrap_err();
        assert_eq!(auth_err(err), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .returning(|_| Err(AppError::InternalError("store offline".into())));

        let svc = AuthService::new(Arc::new(repo), tokens());
        assert!(matches!(
            svc.login("alice", "pw").await,
            Err(AppError::InternalError(_))
        ));
    }

    #[tokio::test]
    async fn test_signup_hands_record_to_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|record| {
                record.username == "alice"
                    && !record.disabled
                    && record.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|_| Ok(()));

        let svc = AuthService::new(Arc::new(repo), tokens());
        svc.signup("alice", "pw", None, None).await.unwrap();
    }
}
