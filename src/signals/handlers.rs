use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::ActiveUser;
use crate::error::AppError;
use crate::signals::classifier::{classify, Features, Signal};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRequest {
    pub symbol: String,
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResponse {
    pub symbol: String,
    pub signal: Signal,
}

impl SignalRequest {
    pub fn evaluate(&self) -> Result<SignalResponse, AppError> {
        let features = Features::try_from(self.features.as_slice())?;
        Ok(SignalResponse {
            symbol: self.symbol.clone(),
            signal: classify(&features),
        })
    }
}

/// `POST /predict`
pub async fn predict(
    user: ActiveUser,
    req: web::Json<SignalRequest>,
) -> Result<HttpResponse, AppError> {
    let result = req.evaluate()?;
    info!("{} -> {} for user {}", result.symbol, result.signal, user.username);
    Ok(HttpResponse::Ok().json(result))
}

/// `POST /batch_predict`. One bad sample fails the whole batch.
pub async fn batch_predict(
    user: ActiveUser,
    req: web::Json<Vec<SignalRequest>>,
) -> Result<HttpResponse, AppError> {
    let results = req
        .iter()
        .map(SignalRequest::evaluate)
        .collect::<Result<Vec<_>, _>>()?;

    info!("Classified batch of {} samples for user {}", results.len(), user.username);
    Ok(HttpResponse::Ok().json(results))
}
