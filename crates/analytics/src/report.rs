use chrono::NaiveDate;
use crate::rounding::round_money;
use core_types::{BotStatus, TimeRange};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete result of one analytics request.
///
/// This struct is the final output of the `AnalyticsEngine` and the data transfer
/// object handed to the dashboard. Field names are the canonical wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub time_range: TimeRange,
    pub overview: AnalyticsOverview,
    pub pnl_time_series: Vec<PnLDataPoint>,
    pub bot_performance: Vec<BotPerformance>,
    pub symbol_performance: Vec<SymbolPerformance>,
}

impl AnalyticsData {
    /// The result for a window with no trades at all.
    pub fn empty(time_range: TimeRange, total_capital_deployed: Decimal) -> Self {
        Self {
            time_range,
            overview: AnalyticsOverview {
                total_capital_deployed: round_money(total_capital_deployed),
                ..AnalyticsOverview::new()
            },
            pnl_time_series: Vec::new(),
            bot_performance: Vec::new(),
            symbol_performance: Vec::new(),
        }
    }
}

/// Portfolio-level statistics over the closed trades of the selected window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    // I. Profitability
    #[serde(rename = "totalPnL")]
    pub total_pnl: Decimal,
    #[serde(rename = "totalPnLPercentage")]
    pub total_pnl_percentage: Decimal,
    pub avg_trade_return: Decimal,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub profit_factor: Decimal,

    // II. Risk
    pub sharpe_ratio: Decimal,
    pub max_drawdown: Decimal,
    pub max_drawdown_percentage: Decimal,

    // III. Trade counts
    /// Every trade in the window, open or closed.
    pub total_trades: usize,
    pub closed_trades: usize,
    pub open_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: Decimal,

    /// Sum of capital over all known bots, independent of the window.
    pub total_capital_deployed: Decimal,
}

impl AnalyticsOverview {
    /// Creates a new, zeroed-out overview.
    pub fn new() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            total_pnl_percentage: Decimal::ZERO,
            avg_trade_return: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            best_trade: Decimal::ZERO,
            worst_trade: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            sharpe_ratio: Decimal::ZERO,
            max_drawdown: Decimal::ZERO,
            max_drawdown_percentage: Decimal::ZERO,
            total_trades: 0,
            closed_trades: 0,
            open_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: Decimal::ZERO,
            total_capital_deployed: Decimal::ZERO,
        }
    }
}

impl Default for AnalyticsOverview {
    fn default() -> Self {
        Self::new()
    }
}

/// One UTC calendar date that had at least one closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLDataPoint {
    pub date: NaiveDate,
    #[serde(rename = "dailyPnL")]
    pub daily_pnl: Decimal,
    #[serde(rename = "cumulativePnL")]
    pub cumulative_pnl: Decimal,
    pub trade_count: usize,
}

/// Statistics shared by every grouping dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    #[serde(rename = "totalPnL")]
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
    /// Closed trades in the group.
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Trades in the group still waiting on a realized P&L.
    pub open_trades: usize,
    #[serde(rename = "avgPnL")]
    pub avg_pnl: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub profit_factor: Decimal,
}

/// Per-bot performance, joined with the bot's reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotPerformance {
    /// The bot id, or `None` for the group of unmanaged trades.
    pub key: Option<String>,
    pub display_name: String,
    /// `None` when no reference data matched the bot id.
    pub status: Option<BotStatus>,
    pub capital: Decimal,
    pub return_on_capital: Decimal,
    #[serde(flatten)]
    pub stats: GroupStats,
}

/// Per-symbol performance with traded volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolPerformance {
    pub key: String,
    pub display_name: String,
    pub total_volume: Decimal,
    pub avg_trade_size: Decimal,
    #[serde(flatten)]
    pub stats: GroupStats,
}
