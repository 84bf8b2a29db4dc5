//! Buff163 goods search adapter.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::SourceError;

use super::encoding::encode_identifier;
use super::parse::{parse_decimal, parse_volume};
use super::source::{fetch_json, PriceSource};
use super::types::{ItemIdentifier, Marketplace, PriceQuote};

/// Body status code Buff163 uses for a successful request.
const BUFF_OK: &str = "OK";

/// Buff163 goods search response.
#[derive(Debug, Clone, Deserialize)]
pub struct BuffResponse {
    /// Status code ("OK" on success, e.g. "Login Required" otherwise).
    pub code: Option<String>,
    /// Payload.
    pub data: Option<BuffData>,
    /// Error message accompanying a non-OK code.
    pub msg: Option<String>,
}

/// Payload of a goods search.
#[derive(Debug, Clone, Deserialize)]
pub struct BuffData {
    /// Matching goods, cheapest first.
    #[serde(default)]
    pub items: Vec<BuffGoods>,
}

/// One goods entry. Numeric fields are kept raw because Buff163 sends
/// prices as strings and counts as integers.
#[derive(Debug, Clone, Deserialize)]
pub struct BuffGoods {
    /// Market hash name.
    pub market_hash_name: Option<String>,
    /// Lowest sell price in CNY.
    #[serde(default)]
    pub sell_min_price: Value,
    /// Number of active sell listings.
    #[serde(default)]
    pub sell_num: Value,
}

/// Convert a CNY amount to USD at the configured fixed rate.
///
/// `None` when the product is not representable.
pub fn cny_to_usd(price_cny: Decimal, rate: Decimal) -> Option<Decimal> {
    price_cny.checked_mul(rate)
}

/// Turn a decoded goods search into a quote.
///
/// The first listed goods entry is the representative price.
pub fn quote_from_response(
    response: BuffResponse,
    cny_to_usd_rate: Decimal,
) -> Result<PriceQuote, SourceError> {
    let marketplace = Marketplace::Buff;

    match response.code.as_deref() {
        Some(BUFF_OK) => {}
        Some(code) => {
            if let Some(msg) = &response.msg {
                debug!(code, msg = %msg, "Buff163 rejected the search");
            }
            return Err(SourceError::Status {
                marketplace,
                code: code.to_string(),
            });
        }
        None => return Err(SourceError::parse(marketplace, "missing code")),
    }

    let data = response
        .data
        .ok_or_else(|| SourceError::parse(marketplace, "missing data"))?;

    let goods = data
        .items
        .into_iter()
        .next()
        .ok_or(SourceError::NoListings { marketplace })?;

    let price_cny = parse_decimal(&goods.sell_min_price).ok_or_else(|| {
        SourceError::parse(
            marketplace,
            format!("invalid sell_min_price: {}", goods.sell_min_price),
        )
    })?;
    if price_cny < Decimal::ZERO {
        return Err(SourceError::parse(
            marketplace,
            format!("negative sell_min_price: {}", price_cny),
        ));
    }

    let volume = match &goods.sell_num {
        Value::Null => 0,
        raw => parse_volume(raw).ok_or_else(|| {
            SourceError::parse(marketplace, format!("invalid sell_num: {}", raw))
        })?,
    };

    let price_usd = cny_to_usd(price_cny, cny_to_usd_rate).ok_or_else(|| {
        SourceError::parse(
            marketplace,
            format!("sell_min_price out of range: {}", price_cny),
        )
    })?;

    Ok(PriceQuote::new(price_usd, volume))
}

/// Buff163 price source.
#[derive(Debug, Clone)]
pub struct BuffSource {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Goods search endpoint.
    api_url: String,
    /// Game filter.
    game: String,
    /// `session` cookie value.
    session: String,
    /// CNY to USD rate.
    cny_to_usd: Decimal,
}

impl BuffSource {
    /// Create a Buff163 source from config, reusing `http`.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.buff_api_url.clone(),
            game: config.buff_game.clone(),
            session: config.buff_session.clone(),
            cny_to_usd: config.cny_to_usd,
        }
    }

    /// Search URL for an item.
    pub fn search_url(&self, item: &ItemIdentifier) -> Result<Url, SourceError> {
        let raw = format!(
            "{}?game={}&search={}",
            self.api_url,
            encode_identifier(&self.game),
            item.encoded()
        );
        Url::parse(&raw).map_err(|source| SourceError::InvalidUrl {
            marketplace: Marketplace::Buff,
            source,
        })
    }

    async fn fetch_quote(&self, item: &ItemIdentifier) -> Result<PriceQuote, SourceError> {
        let url = self.search_url(item)?;
        let request = self
            .http
            .get(url)
            .header(reqwest::header::COOKIE, format!("session={}", self.session));

        let response: BuffResponse = fetch_json(Marketplace::Buff, request).await?;
        quote_from_response(response, self.cny_to_usd)
    }
}

impl PriceSource for BuffSource {
    fn marketplace(&self) -> Marketplace {
        Marketplace::Buff
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn quote(&self, item: &ItemIdentifier) -> Result<PriceQuote, SourceError> {
        match self.fetch_quote(item).await {
            Ok(quote) => {
                debug!(price = %quote.price(), volume = quote.volume(), "Buff163 quote");
                Ok(quote)
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Buff163 lookup failed");
                Err(e)
            }
        }
    }
}
