use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Lifecycle state of a bot as reported by the bot registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    Active,
    Paused,
    Stopped,
    Error,
}

/// The selectable analytics window. Every window except `All` reaches back from "now"
/// and has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    #[default]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 6] = [
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::All,
    ];

    /// The canonical wire label, e.g. `"3M"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::All => "ALL",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeRange::ALL_RANGES
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::InvalidInput(
                    "time range".to_string(),
                    format!("'{}' is not one of 1W, 1M, 3M, 6M, 1Y, ALL", s),
                )
            })
    }
}
