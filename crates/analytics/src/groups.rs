use crate::classify::TradePartition;
use crate::error::AnalyticsError;
use crate::report::{BotPerformance, GroupStats, SymbolPerformance};
use crate::rounding::{
    mean_or_zero, percentage_or_zero, profit_factor, round_money, round_rate, try_add,
};
use core_types::{BotRef, Trade};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Display name used for trades that belong to no bot.
pub const UNMANAGED_DISPLAY_NAME: &str = "Unmanaged";

/// Running totals for one group while the trades are walked.
#[derive(Debug, Clone, Default)]
pub struct GroupAccumulator {
    pub pnl: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub open_trades: usize,
    pub pnl_values: Vec<Decimal>,
    /// Notional of the closed trades, `quantity * price`.
    pub volume: Decimal,
    pub volume_trades: usize,
}

impl GroupAccumulator {
    fn record_closed(&mut self, trade: &Trade, pnl: Decimal) -> Result<(), AnalyticsError> {
        self.pnl = try_add(self.pnl, pnl, "totalPnL")?;
        self.trades += 1;
        if pnl > Decimal::ZERO {
            self.wins += 1;
            self.gross_profit = try_add(self.gross_profit, pnl, "grossProfit")?;
        } else if pnl < Decimal::ZERO {
            self.losses += 1;
            self.gross_loss = try_add(self.gross_loss, pnl.abs(), "grossLoss")?;
        }
        self.pnl_values.push(pnl);

        let notional = trade.notional().ok_or(AnalyticsError::Overflow("totalVolume"))?;
        self.volume = try_add(self.volume, notional, "totalVolume")?;
        self.volume_trades += 1;
        Ok(())
    }

    /// Derives the shared statistics; a group with no closed trades is all zeros.
    pub fn stats(&self) -> Result<GroupStats, AnalyticsError> {
        let best = self.pnl_values.iter().copied().max().unwrap_or(Decimal::ZERO);
        let worst = self.pnl_values.iter().copied().min().unwrap_or(Decimal::ZERO);

        Ok(GroupStats {
            total_pnl: round_money(self.pnl),
            win_rate: round_rate(percentage_or_zero(
                Decimal::from(self.wins),
                Decimal::from(self.trades),
                "winRate",
            )?),
            total_trades: self.trades,
            winning_trades: self.wins,
            losing_trades: self.losses,
            open_trades: self.open_trades,
            avg_pnl: round_money(mean_or_zero(self.pnl, self.trades)),
            best_trade: round_money(best),
            worst_trade: round_money(worst),
            profit_factor: profit_factor(self.gross_profit, self.gross_loss)?,
        })
    }
}

/// Groups the window's trades by an arbitrary ordered key.
///
/// Closed trades feed the statistics. Every filtered trade, open or closed, then
/// makes sure its key is present, so a key with only open trades still shows up
/// with zeroed statistics.
pub fn accumulate_by<K, F>(
    partition: &TradePartition<'_>,
    key_of: F,
) -> Result<BTreeMap<K, GroupAccumulator>, AnalyticsError>
where
    K: Ord,
    F: Fn(&Trade) -> K,
{
    let mut groups: BTreeMap<K, GroupAccumulator> = BTreeMap::new();

    for c in &partition.closed {
        groups
            .entry(key_of(c.trade))
            .or_default()
            .record_closed(c.trade, c.pnl)?;
    }
    for &trade in &partition.open {
        groups.entry(key_of(trade)).or_default().open_trades += 1;
    }

    Ok(groups)
}

/// Per-bot performance joined with the caller's bot reference data.
///
/// A bot id with no matching reference gets a fallback name, no status and zero
/// capital rather than an error.
pub fn bot_performance(
    partition: &TradePartition<'_>,
    bots: &[BotRef],
) -> Result<Vec<BotPerformance>, AnalyticsError> {
    let by_id: HashMap<&str, &BotRef> = bots.iter().map(|b| (b.id.as_str(), b)).collect();

    accumulate_by(partition, |t| t.bot_id.clone())?
        .into_iter()
        .map(|(key, acc)| -> Result<BotPerformance, AnalyticsError> {
            let reference = key.as_deref().and_then(|id| by_id.get(id).copied());
            let (display_name, status, capital) = match (&key, reference) {
                (_, Some(bot)) => (bot.name.clone(), Some(bot.status), bot.capital),
                (Some(id), None) => {
                    tracing::warn!(bot_id = %id, "No reference data for bot; using fallback.");
                    (format!("Unknown bot ({})", id), None, Decimal::ZERO)
                }
                (None, None) => (UNMANAGED_DISPLAY_NAME.to_string(), None, Decimal::ZERO),
            };

            Ok(BotPerformance {
                return_on_capital: round_money(percentage_or_zero(
                    acc.pnl,
                    capital,
                    "returnOnCapital",
                )?),
                capital: round_money(capital),
                key,
                display_name,
                status,
                stats: acc.stats()?,
            })
        })
        .collect()
}

/// Per-symbol performance including traded volume.
pub fn symbol_performance(
    partition: &TradePartition<'_>,
) -> Result<Vec<SymbolPerformance>, AnalyticsError> {
    accumulate_by(partition, |t| t.symbol.clone())?
        .into_iter()
        .map(|(symbol, acc)| -> Result<SymbolPerformance, AnalyticsError> {
            Ok(SymbolPerformance {
                display_name: symbol.clone(),
                total_volume: round_money(acc.volume),
                avg_trade_size: round_money(mean_or_zero(acc.volume, acc.volume_trades)),
                stats: acc.stats()?,
                key: symbol,
            })
        })
        .collect()
}
