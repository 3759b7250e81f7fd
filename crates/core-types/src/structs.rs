use crate::enums::{BotStatus, TradeSide};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single executed trade as recorded by the trade store.
///
/// `profit_loss` is the only signal of whether the trade has been closed out.
/// A trade without it is still open and contributes to raw trade counts only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    /// The owning bot. `None` for trades placed outside any managed bot.
    #[serde(default)]
    pub bot_id: Option<String>,
    pub symbol: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub profit_loss: Option<Decimal>,
}

impl Trade {
    /// The traded notional, `quantity * price`. `None` when the product does not fit
    /// in a `Decimal`.
    pub fn notional(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.price)
    }

    /// Checks the fields that serde cannot enforce on its own.
    pub fn validate(&self) -> Result<(), CoreError> {
        let reject = |reason: &str| CoreError::InvalidTrade {
            trade_id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(reject("id must not be empty"));
        }
        if self.symbol.trim().is_empty() {
            return Err(reject("symbol must not be empty"));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(reject("quantity must be positive"));
        }
        if self.price <= Decimal::ZERO {
            return Err(reject("price must be positive"));
        }
        if self.notional().is_none() {
            return Err(reject("quantity * price overflows"));
        }
        Ok(())
    }
}

/// Reference data for a bot, supplied by the caller alongside the trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotRef {
    pub id: String,
    pub name: String,
    pub status: BotStatus,
    pub capital: Decimal,
}

impl BotRef {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidBot {
                bot_id: self.id.clone(),
                reason: "id must not be empty".to_string(),
            });
        }
        if self.capital.is_sign_negative() && !self.capital.is_zero() {
            return Err(CoreError::InvalidBot {
                bot_id: self.id.clone(),
                reason: "capital must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
