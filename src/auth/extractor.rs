use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use std::ops::Deref;

use crate::db::UserRecord;
use crate::error::{AppError, AuthError};
use crate::AppState;

/// An authenticated, enabled user taken from the `Authorization: Bearer`
/// header. Rejections are produced before the handler runs.
#[derive(Debug, Clone)]
pub struct ActiveUser(pub UserRecord);

impl Deref for ActiveUser {
    type Target = UserRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

impl FromRequest for ActiveUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req).map(str::to_string);

        Box::pin(async move {
            let state = state
                .ok_or_else(|| AppError::InternalError("Application state not configured".into()))?;
            let token = token.ok_or(AuthError::Unauthorized)?;

            let user = state.auth_service.current_user(&token).await?;
            let user = state.auth_service.require_active(user)?;
            Ok(ActiveUser(user))
        })
    }
}
