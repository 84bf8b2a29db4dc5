//! Price source capability shared by every marketplace adapter.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::SourceError;

use super::types::{ItemIdentifier, Marketplace, PriceQuote};

/// A marketplace that can quote one item.
///
/// Implementations make a single best-effort attempt and never panic; every
/// failure is reported as a [`SourceError`].
pub trait PriceSource {
    /// Marketplace served by this source.
    fn marketplace(&self) -> Marketplace;

    /// Look up the current best price and volume for `item`.
    fn quote(
        &self,
        item: &ItemIdentifier,
    ) -> impl Future<Output = Result<PriceQuote, SourceError>> + Send;
}

/// Build the HTTP client shared by the adapters.
///
/// The total timeout is mandatory so a stalled marketplace fails fast.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.http_timeout())
        .connect_timeout(config.connect_timeout())
        // Both endpoints reject default client identifiers
        .user_agent(config.user_agent.as_str())
        .tcp_nodelay(true)
        .build()
}

/// Send `request` and decode its JSON body.
///
/// Transport failures and non-success HTTP statuses map to transport-class
/// errors; an undecodable body maps to [`SourceError::Parse`].
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    marketplace: Marketplace,
    request: reqwest::RequestBuilder,
) -> Result<T, SourceError> {
    let response = request
        .send()
        .await
        .map_err(|source| SourceError::Transport {
            marketplace,
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::HttpStatus {
            marketplace,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| SourceError::Transport {
            marketplace,
            source,
        })?;

    debug!(marketplace = %marketplace, bytes = body.len(), "Received response body");

    serde_json::from_slice(&body)
        .map_err(|e| SourceError::parse(marketplace, format!("invalid response body: {}", e)))
}
