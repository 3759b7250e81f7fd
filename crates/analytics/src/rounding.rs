use crate::error::AnalyticsError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Stand-in for an infinite profit factor (gross profit with no gross loss).
/// Emitted instead of a true infinity so every output stays JSON-safe.
pub const PROFIT_FACTOR_CAP: Decimal = Decimal::from_parts(99_999, 0, 0, false, 2);

const MONEY_DP: u32 = 2;
const RATE_DP: u32 = 1;

/// Rounds a monetary value or ratio to 2 decimal places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate such as the win rate to 1 decimal place.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// `a + b`, failing with `AnalyticsError::Overflow` naming `metric`.
pub fn try_add(a: Decimal, b: Decimal, metric: &'static str) -> Result<Decimal, AnalyticsError> {
    a.checked_add(b).ok_or(AnalyticsError::Overflow(metric))
}

pub fn try_sub(a: Decimal, b: Decimal, metric: &'static str) -> Result<Decimal, AnalyticsError> {
    a.checked_sub(b).ok_or(AnalyticsError::Overflow(metric))
}

pub fn try_mul(a: Decimal, b: Decimal, metric: &'static str) -> Result<Decimal, AnalyticsError> {
    a.checked_mul(b).ok_or(AnalyticsError::Overflow(metric))
}

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
    metric: &'static str,
) -> Result<Decimal, AnalyticsError> {
    if denominator.is_zero() {
        Ok(Decimal::ZERO)
    } else {
        numerator
            .checked_div(denominator)
            .ok_or(AnalyticsError::Overflow(metric))
    }
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percentage_or_zero(
    part: Decimal,
    whole: Decimal,
    metric: &'static str,
) -> Result<Decimal, AnalyticsError> {
    try_mul(ratio_or_zero(part, whole, metric)?, Decimal::ONE_HUNDRED, metric)
}

/// Mean of a count-weighted total, zero for an empty set. Dividing by a count
/// never grows the magnitude, so this cannot overflow.
pub fn mean_or_zero(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Gross profit over gross loss magnitude.
///
/// No losses with some profit yields [`PROFIT_FACTOR_CAP`]; no activity at all yields zero.
pub fn profit_factor(gross_profit: Decimal, gross_loss: Decimal) -> Result<Decimal, AnalyticsError> {
    let gross_loss = gross_loss.abs();
    if gross_loss.is_zero() {
        if gross_profit > Decimal::ZERO {
            Ok(PROFIT_FACTOR_CAP)
        } else {
            Ok(Decimal::ZERO)
        }
    } else {
        Ok(round_money(ratio_or_zero(gross_profit, gross_loss, "profitFactor")?))
    }
}
