//! CS2 skin arbitrage scout.
//!
//! Compares the price of one item on the Steam Community Market and on
//! Buff163 and reports whether buying on Buff163 and selling on Steam is
//! profitable after both marketplaces' fees.
//!
//! # Calculation
//!
//! Both prices are normalized to USD, then each side is reduced by its fee:
//!
//! ```text
//! Steam price:  $100.00   fee 13.04%   net $86.96
//! Buff price:    $70.00   fee  2.50%   net $68.25
//! ───────────────────────────────────────────────
//! Spread:        $18.71   ROI 26.7% of the Buff price
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Item identifiers, quotes and the marketplace price sources
//! - [`arbitrage`]: Spread calculation and concurrent scans
//! - [`catalog`]: Local item name search
//! - [`report`]: Console and JSON rendering
//! - [`metrics`]: Lookup latency and outcome metrics

pub mod arbitrage;
pub mod catalog;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod report;

pub use config::Config;
pub use error::{AppError, Result};
