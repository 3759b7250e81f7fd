use crate::classify::{chronological, ClosedTrade};
use crate::error::AnalyticsError;
use crate::rounding::{try_add, try_mul, try_sub};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use std::collections::BTreeMap;

/// Trading days used to annualize the daily Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Realized P&L and trade count for one UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyBucket {
    pub pnl: Decimal,
    pub trades: usize,
}

/// Buckets closed trades by the UTC calendar date of their timestamp, in date order.
pub fn daily_buckets(
    closed: &[ClosedTrade<'_>],
) -> Result<BTreeMap<NaiveDate, DailyBucket>, AnalyticsError> {
    let mut buckets: BTreeMap<NaiveDate, DailyBucket> = BTreeMap::new();
    for c in closed {
        let bucket = buckets.entry(c.trade.timestamp.date_naive()).or_default();
        bucket.pnl = try_add(bucket.pnl, c.pnl, "dailyPnL")?;
        bucket.trades += 1;
    }
    Ok(buckets)
}

/// Annualized Sharpe ratio over summed daily realized P&L.
///
/// The daily P&L totals stand in for daily returns (no capital base, zero risk-free
/// rate), then `mean / sample_std_dev * sqrt(252)`. Fewer than two trading days or a
/// zero deviation gives zero.
pub fn sharpe_ratio(closed: &[ClosedTrade<'_>]) -> Result<Decimal, AnalyticsError> {
    const METRIC: &str = "sharpeRatio";

    let daily: Vec<Decimal> = daily_buckets(closed)?.values().map(|b| b.pnl).collect();
    if daily.len() < 2 {
        return Ok(Decimal::ZERO);
    }

    let n = Decimal::from(daily.len());
    let total = daily
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| try_add(acc, *r, METRIC))?;
    let mean = total / n;

    let mut squared_deviations = Decimal::ZERO;
    for r in &daily {
        let deviation = try_sub(*r, mean, METRIC)?;
        squared_deviations = try_add(
            squared_deviations,
            try_mul(deviation, deviation, METRIC)?,
            METRIC,
        )?;
    }
    let variance = squared_deviations / (n - Decimal::ONE);

    let std_dev = match variance.sqrt() {
        Some(sd) if sd > Decimal::ZERO => sd,
        _ => return Ok(Decimal::ZERO),
    };
    let annualization = Decimal::from(TRADING_DAYS_PER_YEAR)
        .sqrt()
        .unwrap_or(Decimal::ONE);

    let per_day = mean
        .checked_div(std_dev)
        .ok_or(AnalyticsError::Overflow(METRIC))?;
    try_mul(per_day, annualization, METRIC)
}

/// Largest fall of cumulative realized P&L from its running peak, walking trades in
/// time order. The peak starts at zero, so an opening loss counts as drawdown.
pub fn max_drawdown(closed: &[ClosedTrade<'_>]) -> Result<Decimal, AnalyticsError> {
    let mut cumulative = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut max_drawdown = Decimal::ZERO;

    for c in chronological(closed) {
        cumulative = try_add(cumulative, c.pnl, "maxDrawdown")?;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = try_sub(peak, cumulative, "maxDrawdown")?.max(Decimal::ZERO);
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    Ok(max_drawdown)
}
