//! Fee-adjusted spread and ROI between two marketplace quotes.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ArbitrageError;
use crate::market::PriceQuote;

/// Transaction fee of one marketplace, as a fraction in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeRate(Decimal);

impl FeeRate {
    /// Validate and wrap a fee fraction.
    pub fn new(rate: Decimal) -> Result<Self, ArbitrageError> {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(ArbitrageError::InvalidFeeRate(rate));
        }
        Ok(Self(rate))
    }

    /// The fee fraction.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Net amount after the fee: `gross * (1 - fee)`.
    ///
    /// The factor is at most one, so the result never exceeds `gross`.
    pub fn net(&self, gross: Decimal) -> Decimal {
        gross.saturating_mul(Decimal::ONE - self.0)
    }
}

/// Profit or loss classification of a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Positive spread.
    Profit(Decimal),
    /// Zero or negative spread; holds the absolute loss.
    Loss(Decimal),
}

/// Fee-adjusted comparison of a source (liquidating) and target (acquiring) quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArbitrageResult {
    source_net: Decimal,
    target_net: Decimal,
    spread: Decimal,
    roi_percent: Decimal,
}

impl ArbitrageResult {
    /// Proceeds after the source marketplace fee.
    pub fn source_net(&self) -> Decimal {
        self.source_net
    }

    /// Cost basis after the target marketplace fee.
    pub fn target_net(&self) -> Decimal {
        self.target_net
    }

    /// `source_net - target_net`.
    pub fn spread(&self) -> Decimal {
        self.spread
    }

    /// Spread as a percentage of the target price.
    ///
    /// 0 when the target price is 0. Saturates at `Decimal::MAX` (or
    /// `Decimal::MIN` for a loss) when the target price is so small that the
    /// percentage is not representable.
    pub fn roi_percent(&self) -> Decimal {
        self.roi_percent
    }

    /// Whether moving the item yields a profit.
    pub fn is_profitable(&self) -> bool {
        self.spread > Decimal::ZERO
    }

    /// Classify the spread.
    pub fn verdict(&self) -> Verdict {
        if self.is_profitable() {
            Verdict::Profit(self.spread)
        } else {
            Verdict::Loss(self.spread.abs())
        }
    }
}

/// Compute net proceeds, spread and ROI for two present quotes.
///
/// Pure: no I/O, same inputs always give the same result.
pub fn calculate(
    source: &PriceQuote,
    target: &PriceQuote,
    source_fee: FeeRate,
    target_fee: FeeRate,
) -> ArbitrageResult {
    let source_net = source_fee.net(source.price());
    let target_net = target_fee.net(target.price());
    let spread = source_net - target_net;

    let roi_percent = if target.price() > Decimal::ZERO {
        roi(spread, target.price())
    } else {
        Decimal::ZERO
    };

    ArbitrageResult {
        source_net,
        target_net,
        spread,
        roi_percent,
    }
}

/// `spread / price * 100`, saturating on overflow.
fn roi(spread: Decimal, price: Decimal) -> Decimal {
    spread
        .checked_div(price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if spread.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}
