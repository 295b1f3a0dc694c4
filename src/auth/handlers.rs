use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::auth::ActiveUser;
use crate::error::AppError;
use tracing::{info, error};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// `POST /token` with a form-encoded body.
pub async fn login(
    form: web::Form<TokenRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received token request for user: {}", form.username);
    let access_token = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// `POST /signup`; fields arrive in the query string.
pub async fn signup(
    req: web::Query<SignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received signup request for user: {}", req.username);

    match state
        .auth_service
        .signup(
            &req.username,
            &req.password,
            req.email.as_deref(),
            req.full_name.as_deref(),
        )
        .await
    {
        Ok(_) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "User created successfully"
        }))),
        Err(e) => {
            error!("Signup failed for user: {}: {}", req.username, e);
            Err(e)
        }
    }
}

/// `GET /users/me`
pub async fn me(user: ActiveUser) -> HttpResponse {
    HttpResponse::Ok().json(user.profile())
}
