use crate::classify::ClosedTrade;
use crate::error::AnalyticsError;
use crate::report::PnLDataPoint;
use crate::risk::daily_buckets;
use crate::rounding::{round_money, try_add};
use rust_decimal::Decimal;

/// Builds the daily cumulative P&L curve.
///
/// One point per UTC date with at least one closed trade, in strictly increasing
/// date order. Days without closed trades are skipped, not zero-filled. The running
/// total is accumulated unrounded and each emitted value is rounded on its own, so
/// the last point always equals the rounded overall P&L.
pub fn build_pnl_series(closed: &[ClosedTrade<'_>]) -> Result<Vec<PnLDataPoint>, AnalyticsError> {
    let mut running = Decimal::ZERO;
    daily_buckets(closed)?
        .into_iter()
        .map(|(date, bucket)| -> Result<PnLDataPoint, AnalyticsError> {
            running = try_add(running, bucket.pnl, "cumulativePnL")?;
            Ok(PnLDataPoint {
                date,
                daily_pnl: round_money(bucket.pnl),
                cumulative_pnl: round_money(running),
                trade_count: bucket.trades,
            })
        })
        .collect()
}
