//! Marketplace price sources.
//!
//! This module handles:
//! - Item identifiers, quotes and marketplace types
//! - Identifier encoding for query strings
//! - The `PriceSource` capability and its Steam and Buff163 adapters
//! - Mock source for testing

pub mod buff;
pub mod encoding;
pub mod mock;
pub mod parse;
pub mod source;
pub mod steam;
pub mod types;

pub use buff::BuffSource;
pub use encoding::encode_identifier;
pub use mock::{MockOutcome, MockPriceSource};
pub use source::{build_http_client, PriceSource};
pub use steam::SteamSource;
pub use types::{ItemIdentifier, Marketplace, PriceQuote};
