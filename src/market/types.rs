//! Marketplace, item and quote types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::MarketError;

/// Marketplace a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    /// Steam Community Market (USD, liquidating side).
    #[strum(to_string = "Steam")]
    Steam,
    /// Buff163 (CNY, acquiring side).
    #[strum(to_string = "Buff")]
    Buff,
}

impl Marketplace {
    /// Static lowercase label, used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Marketplace::Steam => "steam",
            Marketplace::Buff => "buff",
        }
    }
}

/// Canonical name of a tradable item variant, e.g. `AWP | Redline (Field-Tested)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ItemIdentifier(String);

impl ItemIdentifier {
    /// Create an identifier from a catalog entry or user input.
    ///
    /// Surrounding whitespace is trimmed; the canonical casing is kept since
    /// Steam market hash names are case-sensitive.
    pub fn new(name: impl AsRef<str>) -> Result<Self, MarketError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MarketError::EmptyIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Transport-encoded form for a URL query component.
    pub fn encoded(&self) -> String {
        super::encoding::encode_identifier(&self.0)
    }
}

impl fmt::Display for ItemIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Best current price and volume for one item on one marketplace.
///
/// Prices are always USD. Only price sources construct quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    price: Decimal,
    volume: u64,
}

impl PriceQuote {
    /// Create a quote. Negative prices are rejected by the parsers before this point.
    pub(crate) fn new(price: Decimal, volume: u64) -> Self {
        debug_assert!(price >= Decimal::ZERO);
        Self { price, volume }
    }

    /// Price in USD.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Listed or sold units.
    pub fn volume(&self) -> u64 {
        self.volume
    }
}
