//! Concurrent two-marketplace lookup feeding the calculator.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use super::calculator::{calculate, ArbitrageResult, FeeRate};
use crate::config::Config;
use crate::error::{AppError, SourceError};
use crate::market::{
    build_http_client, BuffSource, ItemIdentifier, Marketplace, PriceQuote, PriceSource,
    SteamSource,
};
use crate::metrics::{self, LatencyTimer};

/// Overall outcome of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// Both quotes present, positive spread.
    Profitable,
    /// Both quotes present, zero or negative spread.
    Unprofitable,
    /// At least one quote missing; nothing was calculated.
    InsufficientData,
}

/// Everything learned about one item in one scan.
#[derive(Debug)]
pub struct ScanReport {
    /// Item scanned.
    pub item: ItemIdentifier,
    /// Liquidating marketplace.
    pub source_marketplace: Marketplace,
    /// Acquiring marketplace.
    pub target_marketplace: Marketplace,
    /// Quote from the liquidating marketplace.
    pub source: Result<PriceQuote, SourceError>,
    /// Quote from the acquiring marketplace.
    pub target: Result<PriceQuote, SourceError>,
    /// Present only when both quotes are.
    pub result: Option<ArbitrageResult>,
    /// When the scan finished.
    pub scanned_at: OffsetDateTime,
}

impl ScanReport {
    /// Classify the scan.
    pub fn status(&self) -> ScanStatus {
        match &self.result {
            Some(result) if result.is_profitable() => ScanStatus::Profitable,
            Some(_) => ScanStatus::Unprofitable,
            None => ScanStatus::InsufficientData,
        }
    }

    /// Lookup failures, source first.
    pub fn failures(&self) -> Vec<&SourceError> {
        [&self.source, &self.target]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
            .collect()
    }
}

/// Compares a liquidating (source) and an acquiring (target) marketplace.
#[derive(Debug, Clone)]
pub struct Scout<S, T> {
    source: S,
    target: T,
    source_fee: FeeRate,
    target_fee: FeeRate,
}

/// Sell on Steam, buy on Buff163.
pub type MarketScout = Scout<SteamSource, BuffSource>;

impl MarketScout {
    /// Build the Steam/Buff163 scout from validated config.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let http = build_http_client(config)?;
        Ok(Scout::new(
            SteamSource::new(http.clone(), config),
            BuffSource::new(http, config),
            config.steam_fee_rate()?,
            config.buff_fee_rate()?,
        ))
    }
}

impl<S: PriceSource, T: PriceSource> Scout<S, T> {
    /// Create a scout from two sources and their fees.
    pub fn new(source: S, target: T, source_fee: FeeRate, target_fee: FeeRate) -> Self {
        Self {
            source,
            target,
            source_fee,
            target_fee,
        }
    }

    /// Liquidating marketplace.
    pub fn source_marketplace(&self) -> Marketplace {
        self.source.marketplace()
    }

    /// Acquiring marketplace.
    pub fn target_marketplace(&self) -> Marketplace {
        self.target.marketplace()
    }

    /// Quote both marketplaces concurrently and compare them.
    ///
    /// A failed lookup on one side never cancels the other; the calculator
    /// only runs when both quotes are present.
    #[instrument(skip(self), fields(item = %item))]
    pub async fn scan(&self, item: &ItemIdentifier) -> ScanReport {
        metrics::inc_scans();

        let (source, target) = tokio::join!(
            timed_quote(&self.source, item),
            timed_quote(&self.target, item)
        );

        let result = match (&source, &target) {
            (Ok(source_quote), Ok(target_quote)) => Some(calculate(
                source_quote,
                target_quote,
                self.source_fee,
                self.target_fee,
            )),
            _ => None,
        };

        match &result {
            Some(r) if r.is_profitable() => {
                metrics::inc_opportunities_detected();
                info!(
                    spread = %r.spread(),
                    roi_percent = %r.roi_percent(),
                    "Profitable spread detected"
                );
            }
            Some(r) => debug!(spread = %r.spread(), "No profitable spread"),
            None => debug!("Insufficient data, calculation skipped"),
        }

        ScanReport {
            item: item.clone(),
            source_marketplace: self.source.marketplace(),
            target_marketplace: self.target.marketplace(),
            source,
            target,
            result,
            scanned_at: OffsetDateTime::now_utc(),
        }
    }
}

async fn timed_quote<P: PriceSource>(
    source: &P,
    item: &ItemIdentifier,
) -> Result<PriceQuote, SourceError> {
    let marketplace = source.marketplace();
    let _timer = LatencyTimer::new(marketplace);

    let result = source.quote(item).await;
    match &result {
        Ok(_) => metrics::inc_quotes_fetched(marketplace),
        Err(e) => metrics::inc_quote_failures(marketplace, e.kind()),
    }
    result
}
