//! End-to-end tests for the analytics engine
//!
//! Tests cover:
//! - The documented worked examples
//! - Invariants that must hold for any trade set
//! - Time-window selection
//! - The JSON contract consumed by the dashboard

use analytics::{AnalyticsData, AnalyticsEngine, PROFIT_FACTOR_CAP};
use chrono::{DateTime, Duration, Utc};
use core_types::{BotRef, BotStatus, TimeRange, Trade, TradeSide};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

fn now() -> DateTime<Utc> {
    "2024-06-30T18:00:00Z".parse().unwrap()
}

fn trade(id: &str, bot: Option<&str>, symbol: &str, ts: &str, pnl: Option<Decimal>) -> Trade {
    Trade {
        id: id.to_string(),
        bot_id: bot.map(str::to_string),
        symbol: symbol.to_string(),
        side: TradeSide::Buy,
        quantity: dec!(10),
        price: dec!(25),
        timestamp: ts.parse().unwrap(),
        profit_loss: pnl,
    }
}

fn bot(id: &str, name: &str, capital: Decimal) -> BotRef {
    BotRef {
        id: id.to_string(),
        name: name.to_string(),
        status: BotStatus::Active,
        capital,
    }
}

fn run(trades: &[Trade], range: TimeRange, bots: &[BotRef]) -> AnalyticsData {
    AnalyticsEngine::new()
        .compute_at(trades, range, bots, now())
        .expect("valid input")
}

/// A mixed history across two bots, three symbols, unmanaged and open trades.
fn mixed_history() -> Vec<Trade> {
    vec![
        trade("t1", Some("b1"), "AAPL", "2024-06-03T14:00:00Z", Some(dec!(120.50))),
        trade("t2", Some("b1"), "AAPL", "2024-06-03T16:00:00Z", Some(dec!(-45.25))),
        trade("t3", Some("b2"), "TSLA", "2024-06-05T10:00:00Z", Some(dec!(-80))),
        trade("t4", Some("b2"), "TSLA", "2024-06-07T10:00:00Z", Some(dec!(30))),
        trade("t5", None, "SPY", "2024-06-10T10:00:00Z", Some(Decimal::ZERO)),
        trade("t6", Some("b1"), "SPY", "2024-06-12T10:00:00Z", Some(dec!(64.10))),
        trade("t7", Some("b3"), "NVDA", "2024-06-20T10:00:00Z", None),
        trade("t8", Some("b2"), "AAPL", "2024-06-21T10:00:00Z", Some(dec!(-10.01))),
    ]
}

fn mixed_bots() -> Vec<BotRef> {
    vec![bot("b1", "Momentum", dec!(10000)), bot("b2", "Mean Reversion", dec!(5000))]
}

// =============================================================================
// Worked Examples
// =============================================================================

mod examples {
    use super::*;

    #[test]
    fn test_empty_history() {
        let data = run(&[], TimeRange::All, &[]);
        assert_eq!(data.overview.total_pnl, Decimal::ZERO);
        assert_eq!(data.overview.win_rate, Decimal::ZERO);
        assert_eq!(data.overview.profit_factor, Decimal::ZERO);
        assert!(data.pnl_time_series.is_empty());
        assert!(data.bot_performance.is_empty());
        assert!(data.symbol_performance.is_empty());
    }

    #[test]
    fn test_win_and_loss_on_same_day() {
        let trades = vec![
            trade("a", Some("b1"), "AAPL", "2024-06-28T10:00:00Z", Some(dec!(100))),
            trade("b", Some("b1"), "AAPL", "2024-06-28T11:00:00Z", Some(dec!(-40))),
        ];
        let data = run(&trades, TimeRange::All, &[]);

        assert_eq!(data.pnl_time_series.len(), 1);
        let point = &data.pnl_time_series[0];
        assert_eq!(point.daily_pnl, dec!(60));
        assert_eq!(point.cumulative_pnl, dec!(60));
        assert_eq!(point.trade_count, 2);
        assert_eq!(data.overview.total_pnl, dec!(60));
        assert_eq!(data.overview.win_rate, dec!(50));
    }

    #[test]
    fn test_all_winners_hit_profit_factor_cap() {
        let trades = vec![
            trade("a", Some("b1"), "AAPL", "2024-06-26T10:00:00Z", Some(dec!(10))),
            trade("b", Some("b1"), "AAPL", "2024-06-27T10:00:00Z", Some(dec!(10))),
            trade("c", Some("b1"), "AAPL", "2024-06-28T10:00:00Z", Some(dec!(10))),
        ];
        let data = run(&trades, TimeRange::All, &[]);
        assert_eq!(data.overview.profit_factor, dec!(999.99));
        assert_eq!(data.overview.profit_factor, PROFIT_FACTOR_CAP);
        assert_eq!(data.overview.avg_loss, Decimal::ZERO);
    }

    #[test]
    fn test_drawdown_from_running_totals() {
        let trades = vec![
            trade("a", None, "AAPL", "2024-06-26T10:00:00Z", Some(dec!(50))),
            trade("b", None, "AAPL", "2024-06-27T10:00:00Z", Some(dec!(-20))),
            trade("c", None, "AAPL", "2024-06-28T10:00:00Z", Some(dec!(50))),
        ];
        let data = run(&trades, TimeRange::All, &[]);
        assert_eq!(data.overview.max_drawdown, dec!(20));
    }

    #[test]
    fn test_unknown_bot_is_reported_not_rejected() {
        let trades = vec![trade("a", Some("b1"), "AAPL", "2024-06-28T10:00:00Z", Some(dec!(5)))];
        let data = run(&trades, TimeRange::All, &[]);
        let b1 = data
            .bot_performance
            .iter()
            .find(|b| b.key.as_deref() == Some("b1"))
            .expect("b1 present");
        assert_eq!(b1.capital, Decimal::ZERO);
        assert_eq!(b1.return_on_capital, Decimal::ZERO);
    }
}

// =============================================================================
// Invariants
// =============================================================================

mod invariants {
    use super::*;

    #[test]
    fn test_wins_plus_losses_never_exceed_closed() {
        let data = run(&mixed_history(), TimeRange::All, &mixed_bots());
        let o = &data.overview;
        assert!(o.winning_trades + o.losing_trades <= o.closed_trades);
        assert_eq!(o.closed_trades, 7);
        assert_eq!(o.winning_trades, 3);
        assert_eq!(o.losing_trades, 3);
        assert_eq!(o.total_trades, 8);
        assert_eq!(o.open_trades, 1);
    }

    #[test]
    fn test_series_ends_at_total_pnl() {
        let data = run(&mixed_history(), TimeRange::All, &mixed_bots());
        let last = data.pnl_time_series.last().expect("non-empty series");
        assert_eq!(last.cumulative_pnl, data.overview.total_pnl);
        assert_eq!(data.overview.total_pnl, dec!(79.34));
    }

    #[test]
    fn test_series_dates_strictly_increase_and_accumulate() {
        let data = run(&mixed_history(), TimeRange::All, &mixed_bots());
        let series = &data.pnl_time_series;
        let mut running = Decimal::ZERO;
        for (i, point) in series.iter().enumerate() {
            if i > 0 {
                assert!(point.date > series[i - 1].date);
            }
            running += point.daily_pnl;
            assert_eq!(point.cumulative_pnl, running);
        }
        let counted: usize = series.iter().map(|p| p.trade_count).sum();
        assert_eq!(counted, data.overview.closed_trades);
    }

    #[test]
    fn test_drawdown_is_non_negative_and_zero_for_monotonic_curve() {
        let data = run(&mixed_history(), TimeRange::All, &mixed_bots());
        assert!(data.overview.max_drawdown >= Decimal::ZERO);
        // Curve: 120.50, 75.25, -4.75, 25.25, 25.25, 89.35, 79.34 -> peak 120.50, trough -4.75
        assert_eq!(data.overview.max_drawdown, dec!(125.25));

        let rising = vec![
            trade("a", None, "AAPL", "2024-06-26T10:00:00Z", Some(dec!(5))),
            trade("b", None, "AAPL", "2024-06-27T10:00:00Z", Some(Decimal::ZERO)),
            trade("c", None, "AAPL", "2024-06-28T10:00:00Z", Some(dec!(1))),
        ];
        assert_eq!(run(&rising, TimeRange::All, &[]).overview.max_drawdown, Decimal::ZERO);
    }

    #[test]
    fn test_profit_factor_is_always_finite() {
        let only_flat = vec![trade("a", None, "AAPL", "2024-06-26T10:00:00Z", Some(Decimal::ZERO))];
        let only_open = vec![trade("a", None, "AAPL", "2024-06-26T10:00:00Z", None)];
        for trades in [only_flat, only_open, mixed_history()] {
            let data = run(&trades, TimeRange::All, &[]);
            assert!(data.overview.profit_factor <= PROFIT_FACTOR_CAP);
            for group in &data.bot_performance {
                assert!(group.stats.profit_factor <= PROFIT_FACTOR_CAP);
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let trades = mixed_history();
        let bots = mixed_bots();
        let first = run(&trades, TimeRange::All, &bots);
        let second = run(&trades, TimeRange::All, &bots);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_input_order_does_not_change_result() {
        let trades = mixed_history();
        let mut reversed = trades.clone();
        reversed.reverse();
        assert_eq!(
            run(&trades, TimeRange::All, &mixed_bots()),
            run(&reversed, TimeRange::All, &mixed_bots())
        );
    }

    #[test]
    fn test_every_group_key_appears_exactly_once() {
        let trades = mixed_history();
        let data = run(&trades, TimeRange::All, &mixed_bots());

        let expected_bots: HashSet<Option<String>> = trades.iter().map(|t| t.bot_id.clone()).collect();
        let bot_keys: Vec<Option<String>> = data.bot_performance.iter().map(|b| b.key.clone()).collect();
        assert_eq!(bot_keys.len(), expected_bots.len());
        assert_eq!(bot_keys.into_iter().collect::<HashSet<_>>(), expected_bots);

        let expected_symbols: HashSet<String> = trades.iter().map(|t| t.symbol.clone()).collect();
        let symbol_keys: Vec<String> = data.symbol_performance.iter().map(|s| s.key.clone()).collect();
        assert_eq!(symbol_keys.len(), expected_symbols.len());
        assert_eq!(symbol_keys.into_iter().collect::<HashSet<_>>(), expected_symbols);
    }

    #[test]
    fn test_group_totals_reconcile_with_overview() {
        let data = run(&mixed_history(), TimeRange::All, &mixed_bots());
        let bot_total: Decimal = data.bot_performance.iter().map(|b| b.stats.total_pnl).sum();
        let symbol_total: Decimal = data.symbol_performance.iter().map(|s| s.stats.total_pnl).sum();
        assert_eq!(bot_total, data.overview.total_pnl);
        assert_eq!(symbol_total, data.overview.total_pnl);
    }
}

// =============================================================================
// Group Breakdown
// =============================================================================

mod groups {
    use super::*;

    #[test]
    fn test_bot_breakdown_joins_reference_data() {
        let data = run(&mixed_history(), TimeRange::All, &mixed_bots());

        let b1 = data.bot_performance.iter().find(|b| b.key.as_deref() == Some("b1")).unwrap();
        assert_eq!(b1.display_name, "Momentum");
        assert_eq!(b1.status, Some(BotStatus::Active));
        assert_eq!(b1.stats.total_pnl, dec!(139.35));
        assert_eq!(b1.stats.total_trades, 3);
        assert_eq!(b1.stats.win_rate, dec!(66.7));
        assert_eq!(b1.return_on_capital, dec!(1.39));

        let b3 = data.bot_performance.iter().find(|b| b.key.as_deref() == Some("b3")).unwrap();
        assert_eq!(b3.stats.total_trades, 0);
        assert_eq!(b3.stats.open_trades, 1);
        assert_eq!(b3.display_name, "Unknown bot (b3)");

        let unmanaged = data.bot_performance.iter().find(|b| b.key.is_none()).unwrap();
        assert_eq!(unmanaged.stats.total_trades, 1);
        assert_eq!(unmanaged.stats.winning_trades, 0);
        assert_eq!(unmanaged.stats.losing_trades, 0);
    }

    #[test]
    fn test_symbol_breakdown_volume() {
        let data = run(&mixed_history(), TimeRange::All, &mixed_bots());
        let aapl = data.symbol_performance.iter().find(|s| s.key == "AAPL").unwrap();
        // Three closed AAPL trades at 10 x 25
        assert_eq!(aapl.total_volume, dec!(750));
        assert_eq!(aapl.avg_trade_size, dec!(250));

        let nvda = data.symbol_performance.iter().find(|s| s.key == "NVDA").unwrap();
        assert_eq!(nvda.total_volume, Decimal::ZERO);
        assert_eq!(nvda.avg_trade_size, Decimal::ZERO);
    }

    #[test]
    fn test_total_capital_comes_from_all_bots() {
        let mut bots = mixed_bots();
        bots.push(bot("idle", "Idle Bot", dec!(2500)));
        let data = run(&mixed_history(), TimeRange::All, &bots);
        assert_eq!(data.overview.total_capital_deployed, dec!(17500));
        assert!(data.bot_performance.iter().all(|b| b.key.as_deref() != Some("idle")));
    }
}

// =============================================================================
// Time Windows
// =============================================================================

mod windows {
    use super::*;

    #[test]
    fn test_week_window_drops_older_trades() {
        let data = run(&mixed_history(), TimeRange::OneWeek, &mixed_bots());
        // Window starts 2024-06-23T18:00:00Z, which leaves nothing.
        assert_eq!(data.overview.total_trades, 0);

        let recent = vec![
            trade("in", None, "AAPL", &(now() - Duration::days(2)).to_rfc3339(), Some(dec!(3))),
            trade("out", None, "AAPL", &(now() - Duration::days(8)).to_rfc3339(), Some(dec!(7))),
        ];
        let data = run(&recent, TimeRange::OneWeek, &[]);
        assert_eq!(data.overview.total_trades, 1);
        assert_eq!(data.overview.total_pnl, dec!(3));
    }

    #[test]
    fn test_month_window() {
        let data = run(&mixed_history(), TimeRange::OneMonth, &mixed_bots());
        // 2024-05-30T18:00:00Z onwards keeps the whole June history.
        assert_eq!(data.overview.total_trades, 8);
        assert_eq!(data.time_range, TimeRange::OneMonth);
    }

    #[test]
    fn test_all_window_keeps_everything() {
        let mut trades = mixed_history();
        trades.push(trade("ancient", None, "IBM", "1995-01-03T15:00:00Z", Some(dec!(1))));
        let data = run(&trades, TimeRange::All, &[]);
        assert_eq!(data.overview.total_trades, 9);
        assert_eq!(
            data.pnl_time_series.first().unwrap().date.to_string(),
            "1995-01-03"
        );
    }
}

// =============================================================================
// Wire Contract
// =============================================================================

mod contract {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let data = run(&mixed_history(), TimeRange::ThreeMonths, &mixed_bots());
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["timeRange"], "3M");
        for field in [
            "totalPnL",
            "totalPnLPercentage",
            "winRate",
            "totalTrades",
            "winningTrades",
            "losingTrades",
            "sharpeRatio",
            "profitFactor",
            "maxDrawdown",
            "maxDrawdownPercentage",
            "avgTradeReturn",
            "avgWin",
            "avgLoss",
            "bestTrade",
            "worstTrade",
            "totalCapitalDeployed",
        ] {
            assert!(json["overview"].get(field).is_some(), "missing overview.{field}");
        }

        let point = &json["pnlTimeSeries"][0];
        assert_eq!(point["date"], "2024-06-03");
        assert!(point["dailyPnL"].is_number());
        assert!(point["cumulativePnL"].is_number());
        assert!(point["tradeCount"].is_number());

        let bot = &json["botPerformance"][0];
        for field in ["key", "displayName", "status", "capital", "returnOnCapital", "totalPnL", "avgPnL", "profitFactor"] {
            assert!(bot.get(field).is_some(), "missing botPerformance.{field}");
        }
        let symbol = &json["symbolPerformance"][0];
        for field in ["key", "displayName", "totalVolume", "avgTradeSize", "winRate", "bestTrade"] {
            assert!(symbol.get(field).is_some(), "missing symbolPerformance.{field}");
        }
    }

    #[test]
    fn test_cap_serializes_as_plain_number() {
        let trades = vec![trade("a", None, "AAPL", "2024-06-26T10:00:00Z", Some(dec!(10)))];
        let json = serde_json::to_value(run(&trades, TimeRange::All, &[])).unwrap();
        assert_eq!(json["overview"]["profitFactor"].as_f64(), Some(999.99));
    }

    #[test]
    fn test_unmanaged_key_is_null() {
        let trades = vec![trade("a", None, "AAPL", "2024-06-26T10:00:00Z", Some(dec!(10)))];
        let json = serde_json::to_value(run(&trades, TimeRange::All, &[])).unwrap();
        assert!(json["botPerformance"][0]["key"].is_null());
        assert_eq!(json["botPerformance"][0]["displayName"], "Unmanaged");
    }
}
