pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod signals;

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::{web, HttpResponse};
use chrono::Duration;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{ActiveUser, AuthService, PasswordHasher, TokenService};
pub use db::{InMemoryUserDirectory, UserProfile, UserRecord, UserRepository};
pub use signals::{classify, Features, Signal};

/// Service banner at `GET /`
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Financial Babaji API is running."
    }))
}

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers every route of the API. Body, form and query rejections are
/// rendered through [`AppError`] like every other failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }));

    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/token", web::post().to(auth::handlers::login))
        .route("/signup", web::post().to(auth::handlers::signup))
        .route("/users/me", web::get().to(auth::handlers::me))
        .route("/predict", web::post().to(signals::handlers::predict))
        .route("/batch_predict", web::post().to(signals::handlers::batch_predict));
}

pub fn cors(config: &crate::config::CorsConfig) -> Cors {
    if !config.enabled {
        // CORS disabled - use most restrictive settings
        return Cors::default();
    }

    let cors = if config.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
            .supports_credentials()
    };

    cors.max_age(config.max_age as usize)
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// State backed by a fresh in-process user directory.
    pub fn new(config: Settings) -> Self {
        Self::with_repository(config, Arc::new(InMemoryUserDirectory::new()))
    }

    pub fn with_repository(config: Settings, users: Arc<dyn UserRepository>) -> Self {
        let tokens = TokenService::new(
            &config.auth.jwt_secret,
            Duration::minutes(config.auth.token_expiry_minutes),
        );

        Self {
            config: Arc::new(config),
            auth_service: Arc::new(AuthService::new(users, tokens)),
        }
    }
}
