use core_types::Trade;
use rust_decimal::Decimal;

/// A trade with a recorded realized P&L, carried with that P&L unwrapped.
#[derive(Debug, Clone, Copy)]
pub struct ClosedTrade<'a> {
    pub trade: &'a Trade,
    pub pnl: Decimal,
}

/// The filtered trades split by whether a realized P&L is present.
#[derive(Debug, Default)]
pub struct TradePartition<'a> {
    pub closed: Vec<ClosedTrade<'a>>,
    pub open: Vec<&'a Trade>,
}

impl<'a> TradePartition<'a> {
    /// Partitions trades in input order. A flat `0` P&L is a closed trade.
    pub fn split(trades: &[&'a Trade]) -> Self {
        let mut partition = Self::default();
        for &trade in trades {
            match trade.profit_loss {
                Some(pnl) => partition.closed.push(ClosedTrade { trade, pnl }),
                None => partition.open.push(trade),
            }
        }
        partition
    }

    pub fn len(&self) -> usize {
        self.closed.len() + self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The closed trades ordered by timestamp. Ties keep their input order.
pub fn chronological<'a>(closed: &[ClosedTrade<'a>]) -> Vec<ClosedTrade<'a>> {
    let mut ordered = closed.to_vec();
    ordered.sort_by_key(|c| c.trade.timestamp);
    ordered
}
