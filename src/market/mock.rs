//! Mock price source for unit testing.
//!
//! This module provides a price source that can be used in tests
//! without making real network requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::error::SourceError;

use super::source::PriceSource;
use super::types::{ItemIdentifier, Marketplace, PriceQuote};

/// What the mock answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    /// A quote with this USD price and volume.
    Quote {
        /// Price in USD.
        price: Decimal,
        /// Volume.
        volume: u64,
    },
    /// HTTP 503 from the endpoint.
    Unavailable,
    /// Lookup matched nothing.
    NoListings,
    /// Body flagged as unsuccessful.
    Unsuccessful,
    /// Body could not be parsed.
    Malformed(String),
}

/// Mock price source for testing.
#[derive(Debug, Clone)]
pub struct MockPriceSource {
    /// Marketplace this mock pretends to be.
    marketplace: Marketplace,
    /// Canned answer.
    outcome: MockOutcome,
    /// Simulated latency.
    latency: Duration,
    /// Number of `quote` calls made.
    calls: Arc<AtomicUsize>,
}

impl MockPriceSource {
    /// Create a mock that always returns the given outcome.
    pub fn new(marketplace: Marketplace, outcome: MockOutcome) -> Self {
        Self {
            marketplace,
            outcome,
            latency: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that quotes `price` with `volume`.
    pub fn quoting(marketplace: Marketplace, price: Decimal, volume: u64) -> Self {
        Self::new(marketplace, MockOutcome::Quote { price, volume })
    }

    /// Create a mock that always fails with `outcome`.
    pub fn failing(marketplace: Marketplace, outcome: MockOutcome) -> Self {
        Self::new(marketplace, outcome)
    }

    /// Delay every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceSource for MockPriceSource {
    fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    async fn quote(&self, _item: &ItemIdentifier) -> Result<PriceQuote, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let marketplace = self.marketplace;
        match &self.outcome {
            MockOutcome::Quote { price, volume } => {
                if *price < Decimal::ZERO {
                    return Err(SourceError::parse(marketplace, "negative price"));
                }
                Ok(PriceQuote::new(*price, *volume))
            }
            MockOutcome::Unavailable => Err(SourceError::HttpStatus {
                marketplace,
                status: 503,
            }),
            MockOutcome::NoListings => Err(SourceError::NoListings { marketplace }),
            MockOutcome::Unsuccessful => Err(SourceError::Unsuccessful { marketplace }),
            MockOutcome::Malformed(reason) => Err(SourceError::parse(marketplace, reason.clone())),
        }
    }
}
