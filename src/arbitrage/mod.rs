//! Arbitrage module comparing marketplace quotes.
//!
//! This module handles:
//! - Fee-adjusted spread and ROI calculations
//! - Concurrent two-marketplace scans

pub mod calculator;
pub mod scout;

pub use calculator::{calculate, ArbitrageResult, FeeRate, Verdict};
pub use scout::{MarketScout, ScanReport, ScanStatus, Scout};
