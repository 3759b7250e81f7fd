use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid trade '{trade_id}': {reason}")]
    InvalidTrade { trade_id: String, reason: String },

    #[error("Invalid bot reference '{bot_id}': {reason}")]
    InvalidBot { bot_id: String, reason: String },
}
