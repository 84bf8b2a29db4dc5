//! Unified error types for the arbitrage scout.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::market::Marketplace;

/// Unified error type for the arbitrage scout.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Item identifier error.
    #[error("market error: {0}")]
    Market(#[from] MarketError),

    /// Price source error.
    #[error("price source error: {0}")]
    Source(#[from] SourceError),

    /// Item catalog error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Arbitrage calculation error.
    #[error("arbitrage error: {0}")]
    Arbitrage(#[from] ArbitrageError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Item identifier errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// The identifier was empty or whitespace only.
    #[error("item identifier must not be empty")]
    EmptyIdentifier,
}

/// Failure of a single price lookup.
///
/// Every variant means "no quote" to the caller; the variant only records why.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection refused, DNS failure, timeout or a body that could not be read.
    #[error("{marketplace} connection error: {source}")]
    Transport {
        /// Marketplace that failed.
        marketplace: Marketplace,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success HTTP status.
    #[error("{marketplace} returned HTTP {status}")]
    HttpStatus {
        /// Marketplace that failed.
        marketplace: Marketplace,
        /// HTTP status code.
        status: u16,
    },

    /// The body carried a non-success status code.
    #[error("{marketplace} returned status code {code:?}")]
    Status {
        /// Marketplace that failed.
        marketplace: Marketplace,
        /// Code reported in the body.
        code: String,
    },

    /// The body carried an explicit failure flag.
    #[error("{marketplace} reported an unsuccessful lookup")]
    Unsuccessful {
        /// Marketplace that failed.
        marketplace: Marketplace,
    },

    /// The lookup succeeded but matched no listings.
    #[error("{marketplace} has no listings for this item")]
    NoListings {
        /// Marketplace that failed.
        marketplace: Marketplace,
    },

    /// Missing field, malformed JSON or a non-numeric value.
    #[error("{marketplace} data parsing error: {reason}")]
    Parse {
        /// Marketplace that failed.
        marketplace: Marketplace,
        /// What could not be parsed.
        reason: String,
    },

    /// Request URL could not be built from the configured base URL.
    #[error("{marketplace} request url invalid: {source}")]
    InvalidUrl {
        /// Marketplace that failed.
        marketplace: Marketplace,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

impl SourceError {
    /// Marketplace this failure belongs to.
    pub fn marketplace(&self) -> Marketplace {
        match self {
            SourceError::Transport { marketplace, .. }
            | SourceError::HttpStatus { marketplace, .. }
            | SourceError::Status { marketplace, .. }
            | SourceError::Unsuccessful { marketplace }
            | SourceError::NoListings { marketplace }
            | SourceError::Parse { marketplace, .. }
            | SourceError::InvalidUrl { marketplace, .. } => *marketplace,
        }
    }

    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Transport { .. } => "transport",
            SourceError::HttpStatus { .. } => "http_status",
            SourceError::Status { .. } => "status",
            SourceError::Unsuccessful { .. } => "unsuccessful",
            SourceError::NoListings { .. } => "no_listings",
            SourceError::Parse { .. } => "parse",
            SourceError::InvalidUrl { .. } => "invalid_url",
        }
    }

    /// Whether the failure happened before a usable response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SourceError::Transport { .. } | SourceError::HttpStatus { .. }
        )
    }

    pub(crate) fn parse(marketplace: Marketplace, reason: impl Into<String>) -> Self {
        SourceError::Parse {
            marketplace,
            reason: reason.into(),
        }
    }
}

/// Item catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("'{path}' not found")]
    NotFound {
        /// Path that was tried.
        path: String,
    },

    /// The catalog file exists but could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path that was tried.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Arbitrage calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArbitrageError {
    /// Fee rate outside of [0, 1).
    #[error("invalid fee rate {0}: must be in [0, 1)")]
    InvalidFeeRate(Decimal),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
