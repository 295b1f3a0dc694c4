use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

pub const FEATURE_COUNT: usize = 4;

const OVERSOLD_RSI: f64 = 30.0;
const OVERBOUGHT_RSI: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Hold => "Hold",
        };
        f.write_str(label)
    }
}

/// Indicator vector in wire order: rsi, macd, volume, price_change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub rsi: f64,
    pub macd: f64,
    pub volume: f64,
    pub price_change: f64,
}

impl From<[f64; FEATURE_COUNT]> for Features {
    fn from([rsi, macd, volume, price_change]: [f64; FEATURE_COUNT]) -> Self {
        Self { rsi, macd, volume, price_change }
    }
}

impl TryFrom<&[f64]> for Features {
    type Error = AppError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            AppError::ValidationError(format!(
                "features must contain exactly {} values (rsi, macd, volume, price_change), got {}",
                FEATURE_COUNT,
                values.len()
            ))
        })?;
        Ok(array.into())
    }
}

/// Threshold rule over RSI and MACD. `volume` and `price_change` do not
/// influence the label yet. NaN fails every comparison and yields `Hold`.
pub fn classify(features: &Features) -> Signal {
    if features.rsi < OVERSOLD_RSI && features.macd > 0.0 {
        Signal::Buy
    } else if features.rsi > OVERBOUGHT_RSI && features.macd < 0.0 {
        Signal::Sell
    } else {
        Signal::Hold
    }
}
