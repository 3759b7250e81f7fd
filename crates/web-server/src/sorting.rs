use analytics::{AnalyticsData, GroupStats};
use serde::Deserialize;
use std::cmp::Ordering;

/// Column the group tables are ordered by before they leave the server.
///
/// The engine makes no ordering promise, so the ordering is applied here, on the
/// caller side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Total P&L, highest first.
    #[default]
    Pnl,
    /// Win rate, highest first.
    WinRate,
    /// Closed trade count, highest first.
    Trades,
    /// Group key, ascending.
    Key,
}

fn by_stats(key: SortKey, a: &GroupStats, b: &GroupStats) -> Ordering {
    match key {
        SortKey::Pnl => b.total_pnl.cmp(&a.total_pnl),
        SortKey::WinRate => b.win_rate.cmp(&a.win_rate),
        SortKey::Trades => b.total_trades.cmp(&a.total_trades),
        SortKey::Key => Ordering::Equal,
    }
}

/// Orders both group tables in place. Ties fall back to the group key.
pub fn sort_groups(data: &mut AnalyticsData, key: SortKey) {
    data.bot_performance
        .sort_by(|a, b| by_stats(key, &a.stats, &b.stats).then_with(|| a.key.cmp(&b.key)));
    data.symbol_performance
        .sort_by(|a, b| by_stats(key, &a.stats, &b.stats).then_with(|| a.key.cmp(&b.key)));
}
