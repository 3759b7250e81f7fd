use crate::classify::TradePartition;
use crate::error::AnalyticsError;
use crate::filter::filter_by_range;
use crate::groups::{bot_performance, symbol_performance};
use crate::overview::calculate_overview;
use crate::report::AnalyticsData;
use crate::rounding::try_add;
use crate::series::build_pnl_series;
use chrono::{DateTime, Utc};
use core_types::{BotRef, TimeRange, Trade};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// A stateless calculator for deriving performance analytics from trade records.
///
/// Every call runs the whole pipeline from scratch on the data it is handed, so the
/// engine can be shared freely between concurrent requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating analytics, windowed against the current time.
    ///
    /// # Arguments
    ///
    /// * `trades` - Every known trade, open or closed, in any order.
    /// * `time_range` - The window to report on.
    /// * `bots` - Reference data for the bots the trades may belong to.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AnalyticsData` or an `AnalyticsError` when any input
    /// record is malformed.
    pub fn compute(
        &self,
        trades: &[Trade],
        time_range: TimeRange,
        bots: &[BotRef],
    ) -> Result<AnalyticsData, AnalyticsError> {
        self.compute_at(trades, time_range, bots, Utc::now())
    }

    /// Same as [`compute`](Self::compute) with an explicit "now".
    pub fn compute_at(
        &self,
        trades: &[Trade],
        time_range: TimeRange,
        bots: &[BotRef],
        now: DateTime<Utc>,
    ) -> Result<AnalyticsData, AnalyticsError> {
        self.validate(trades, bots)?;

        let total_capital = bots
            .iter()
            .try_fold(Decimal::ZERO, |acc, b| try_add(acc, b.capital, "totalCapitalDeployed"))?;
        let filtered = filter_by_range(trades, time_range, now);
        let partition = TradePartition::split(&filtered);

        tracing::debug!(
            range = %time_range,
            input = trades.len(),
            filtered = filtered.len(),
            closed = partition.closed.len(),
            open = partition.open.len(),
            "Computing analytics."
        );

        if partition.is_empty() {
            return Ok(AnalyticsData::empty(time_range, total_capital));
        }

        Ok(AnalyticsData {
            time_range,
            overview: calculate_overview(&partition, total_capital)?,
            pnl_time_series: build_pnl_series(&partition.closed)?,
            bot_performance: bot_performance(&partition, bots)?,
            symbol_performance: symbol_performance(&partition)?,
        })
    }

    /// Rejects the request on the first malformed trade or bot record.
    fn validate(&self, trades: &[Trade], bots: &[BotRef]) -> Result<(), AnalyticsError> {
        let mut seen = HashSet::with_capacity(trades.len());
        for trade in trades {
            trade.validate()?;
            if !seen.insert(trade.id.as_str()) {
                return Err(AnalyticsError::DuplicateTrade(trade.id.clone()));
            }
        }
        for bot in bots {
            bot.validate()?;
        }
        Ok(())
    }
}
