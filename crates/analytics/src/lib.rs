//! # Botwatch Analytics Engine
//!
//! This crate turns a collection of executed trades into the performance analytics
//! shown on the bot dashboard: portfolio totals and ratios, a daily cumulative P&L
//! curve, and per-bot / per-symbol breakdowns for a selectable time window.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0). Trades and bot reference data are fetched
//!   by the caller and passed in as plain slices.
//! - **Stateless Calculation:** The `AnalyticsEngine` holds no state and performs no I/O.
//!   Identical inputs always produce identical `AnalyticsData`.
//! - **Wire-safe numbers:** Every output is a finite `Decimal`. Divisions by zero resolve
//!   to zero and an unbounded profit factor is capped at `PROFIT_FACTOR_CAP`. Arithmetic
//!   that would leave the `Decimal` range returns `AnalyticsError::Overflow` instead.
//!
//! ## Pipeline
//!
//! `filter` (time window) -> `classify` (closed vs open) -> `overview`, `series` and
//! `groups` -> `AnalyticsData`.
//!
//! The Sharpe ratio treats summed daily realized P&L as the daily return series and
//! annualizes it with sqrt(252). It is a dashboard indicator, not a return-on-capital
//! Sharpe ratio.

// Declare the modules that constitute this crate.
pub mod classify;
pub mod engine;
pub mod error;
pub mod filter;
pub mod groups;
pub mod overview;
pub mod report;
pub mod risk;
pub mod rounding;
pub mod series;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    AnalyticsData, AnalyticsOverview, BotPerformance, GroupStats, PnLDataPoint, SymbolPerformance,
};
pub use rounding::PROFIT_FACTOR_CAP;
