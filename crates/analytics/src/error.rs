use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// A malformed trade or bot record. The whole request is rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),

    #[error("Duplicate trade id '{0}' in input")]
    DuplicateTrade(String),

    /// An intermediate value left the range a `Decimal` can hold.
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

