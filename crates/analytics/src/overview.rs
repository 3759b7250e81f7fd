use crate::classify::TradePartition;
use crate::error::AnalyticsError;
use crate::report::AnalyticsOverview;
use crate::risk::{max_drawdown, sharpe_ratio};
use crate::rounding::{
    mean_or_zero, percentage_or_zero, profit_factor, round_money, round_rate, try_add,
};
use rust_decimal::Decimal;

/// Calculates the portfolio-level statistics for one window.
///
/// P&L statistics come from the closed trades only; `total_trades` counts every
/// filtered trade, and `total_capital_deployed` is passed through from the bot
/// reference data.
pub fn calculate_overview(
    partition: &TradePartition<'_>,
    total_capital_deployed: Decimal,
) -> Result<AnalyticsOverview, AnalyticsError> {
    let mut overview = AnalyticsOverview {
        total_trades: partition.len(),
        closed_trades: partition.closed.len(),
        open_trades: partition.open.len(),
        total_capital_deployed: round_money(total_capital_deployed),
        ..AnalyticsOverview::new()
    };

    let closed = &partition.closed;
    if closed.is_empty() {
        return Ok(overview);
    }

    // --- Profitability ---
    let mut total_pnl = Decimal::ZERO;
    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut best = Decimal::MIN;
    let mut worst = Decimal::MAX;

    for c in closed {
        total_pnl = try_add(total_pnl, c.pnl, "totalPnL")?;
        best = best.max(c.pnl);
        worst = worst.min(c.pnl);

        if c.pnl > Decimal::ZERO {
            gross_profit = try_add(gross_profit, c.pnl, "grossProfit")?;
            overview.winning_trades += 1;
        } else if c.pnl < Decimal::ZERO {
            gross_loss = try_add(gross_loss, c.pnl.abs(), "grossLoss")?;
            overview.losing_trades += 1;
        }
    }

    overview.total_pnl = round_money(total_pnl);
    overview.best_trade = round_money(best);
    overview.worst_trade = round_money(worst);
    overview.avg_trade_return = round_money(mean_or_zero(total_pnl, closed.len()));
    overview.avg_win = round_money(mean_or_zero(gross_profit, overview.winning_trades));
    overview.avg_loss = round_money(mean_or_zero(gross_loss, overview.losing_trades));
    overview.profit_factor = profit_factor(gross_profit, gross_loss)?;
    overview.win_rate = round_rate(percentage_or_zero(
        Decimal::from(overview.winning_trades),
        Decimal::from(closed.len()),
        "winRate",
    )?);
    overview.total_pnl_percentage = round_money(percentage_or_zero(
        total_pnl,
        total_capital_deployed,
        "totalPnLPercentage",
    )?);

    // --- Risk ---
    let drawdown = max_drawdown(closed)?;
    overview.max_drawdown = round_money(drawdown);
    overview.max_drawdown_percentage = round_money(percentage_or_zero(
        drawdown,
        total_capital_deployed,
        "maxDrawdownPercentage",
    )?);
    overview.sharpe_ratio = round_money(sharpe_ratio(closed)?);

    Ok(overview)
}
