//! # Botwatch Core Types
//!
//! The shared vocabulary of the workspace: trade records as they arrive from the
//! trade store, the bot reference data they are joined against, and the time
//! windows a caller can ask the analytics engine for.
//!
//! As a Layer 0 crate it performs no I/O and depends on nothing else in the workspace.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{BotStatus, TimeRange, TradeSide};
pub use error::CoreError;
pub use structs::{BotRef, Trade};
