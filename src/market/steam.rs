//! Steam Community Market price overview adapter.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::SourceError;

use super::parse::{parse_formatted_price, parse_volume};
use super::source::{fetch_json, PriceSource};
use super::types::{ItemIdentifier, Marketplace, PriceQuote};

/// Steam price overview response.
#[derive(Debug, Clone, Deserialize)]
pub struct SteamPriceOverview {
    /// Whether the lookup succeeded.
    #[serde(default)]
    pub success: bool,
    /// Lowest listing price, formatted (e.g., "$1,234.56").
    pub lowest_price: Option<String>,
    /// Units sold in the last 24h, formatted (e.g., "1,024").
    #[serde(default)]
    pub volume: Value,
}

/// Turn a decoded price overview into a quote.
pub fn quote_from_overview(overview: SteamPriceOverview) -> Result<PriceQuote, SourceError> {
    let marketplace = Marketplace::Steam;

    if !overview.success {
        return Err(SourceError::Unsuccessful { marketplace });
    }

    let raw_price = overview
        .lowest_price
        .as_deref()
        .ok_or_else(|| SourceError::parse(marketplace, "missing lowest_price"))?;
    let price = parse_formatted_price(raw_price).ok_or_else(|| {
        SourceError::parse(marketplace, format!("invalid lowest_price: {:?}", raw_price))
    })?;

    let volume = match &overview.volume {
        Value::Null => 0,
        raw => parse_volume(raw).ok_or_else(|| {
            SourceError::parse(marketplace, format!("invalid volume: {}", raw))
        })?,
    };

    Ok(PriceQuote::new(price, volume))
}

/// Steam Community Market price source.
#[derive(Debug, Clone)]
pub struct SteamSource {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Price overview endpoint.
    api_url: String,
    /// App id (730 for CS2).
    app_id: u32,
    /// Currency code (1 for USD).
    currency: u32,
}

impl SteamSource {
    /// Create a Steam source from config, reusing `http`.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.steam_api_url.clone(),
            app_id: config.steam_app_id,
            currency: config.steam_currency,
        }
    }

    /// Price overview URL for an item.
    pub fn overview_url(&self, item: &ItemIdentifier) -> Result<Url, SourceError> {
        let raw = format!(
            "{}?appid={}&currency={}&market_hash_name={}",
            self.api_url,
            self.app_id,
            self.currency,
            item.encoded()
        );
        Url::parse(&raw).map_err(|source| SourceError::InvalidUrl {
            marketplace: Marketplace::Steam,
            source,
        })
    }

    async fn fetch_quote(&self, item: &ItemIdentifier) -> Result<PriceQuote, SourceError> {
        let url = self.overview_url(item)?;
        let overview: SteamPriceOverview =
            fetch_json(Marketplace::Steam, self.http.get(url)).await?;
        quote_from_overview(overview)
    }
}

impl PriceSource for SteamSource {
    fn marketplace(&self) -> Marketplace {
        Marketplace::Steam
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn quote(&self, item: &ItemIdentifier) -> Result<PriceQuote, SourceError> {
        match self.fetch_quote(item).await {
            Ok(quote) => {
                debug!(price = %quote.price(), volume = quote.volume(), "Steam quote");
                Ok(quote)
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Steam lookup failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::source::local_server::serve_once;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn decode(body: serde_json::Value) -> SteamPriceOverview {
        serde_json::from_value(body).unwrap()
    }

    fn test_source(api_url: &str) -> SteamSource {
        let config = Config {
            steam_api_url: api_url.to_string(),
            http_timeout_ms: 2_000,
            http_connect_timeout_ms: 1_000,
            ..Config::default()
        };
        let http = crate::market::build_http_client(&config).unwrap();
        SteamSource::new(http, &config)
    }

    #[test]
    fn formatted_price_and_volume_are_parsed() {
        let overview = decode(json!({
            "success": true,
            "lowest_price": "$1,234.56",
            "volume": "1,024",
            "median_price": "$1,200.00"
        }));

        let quote = quote_from_overview(overview).unwrap();
        assert_eq!(quote.price(), dec!(1234.56));
        assert_eq!(quote.volume(), 1024);
    }

    #[test]
    fn missing_volume_defaults_to_zero() {
        let overview = decode(json!({ "success": true, "lowest_price": "$0.03" }));
        let quote = quote_from_overview(overview).unwrap();
        assert_eq!(quote.price(), dec!(0.03));
        assert_eq!(quote.volume(), 0);
    }

    #[test]
    fn leading_fraction_price_is_kept() {
        let overview = decode(json!({ "success": true, "lowest_price": "$.50", "volume": "3" }));
        assert_eq!(quote_from_overview(overview).unwrap().price(), dec!(0.50));
    }

    #[test]
    fn unsuccessful_flag_is_reported() {
        let err = quote_from_overview(decode(json!({ "success": false }))).unwrap_err();
        assert!(matches!(err, SourceError::Unsuccessful { marketplace: Marketplace::Steam }));

        // Absent flag counts as failure too
        let err = quote_from_overview(decode(json!({ "lowest_price": "$1.00" }))).unwrap_err();
        assert!(matches!(err, SourceError::Unsuccessful { .. }));
    }

    #[test]
    fn malformed_fields_are_parse_errors() {
        let cases = [
            json!({ "success": true, "volume": "12" }),
            json!({ "success": true, "lowest_price": "free", "volume": "12" }),
            json!({ "success": true, "lowest_price": "-$5.25", "volume": "12" }),
            json!({ "success": true, "lowest_price": "$1.00", "volume": "a dozen" }),
        ];

        for body in cases {
            let err = quote_from_overview(decode(body.clone())).unwrap_err();
            assert!(
                matches!(err, SourceError::Parse { .. }),
                "expected parse error for {body}, got {err}"
            );
        }
    }

    #[test]
    fn overview_url_carries_app_currency_and_name() {
        let source = test_source("https://steamcommunity.com/market/priceoverview/");
        let item = ItemIdentifier::new("★ Karambit | Fade (Factory New)").unwrap();
        let url = source.overview_url(&item).unwrap();
        assert_eq!(
            url.as_str(),
            "https://steamcommunity.com/market/priceoverview/?appid=730&currency=1&market_hash_name=%E2%98%85%20Karambit%20%7C%20Fade%20%28Factory%20New%29"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_transport_error() {
        let source = test_source("http://127.0.0.1:1/market/priceoverview/");
        let item = ItemIdentifier::new("AK-47 | Slate (Field-Tested)").unwrap();

        let err = source.quote(&item).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.marketplace(), Marketplace::Steam);
    }
    #[tokio::test]
    async fn quote_over_the_wire() {
        let body = json!({
            "success": true,
            "lowest_price": "$1,234.56",
            "volume": "17",
            "median_price": "$1,199.99"
        });
        let (base, head) = serve_once("200 OK", body.to_string()).await;
        let source = test_source(&format!("{}/market/priceoverview/", base));
        let item = ItemIdentifier::new("AWP | Dragon Lore (Field-Tested)").unwrap();

        let quote = source.quote(&item).await.unwrap();
        assert_eq!(quote.price(), dec!(1234.56));
        assert_eq!(quote.volume(), 17);

        let head = head.await.unwrap();
        assert!(
            head.starts_with(
                "GET /market/priceoverview/?appid=730&currency=1&market_hash_name=AWP%20%7C%20Dragon%20Lore%20%28Field-Tested%29 HTTP/1.1\r\n"
            ),
            "{head}"
        );
    }

    #[tokio::test]
    async fn rate_limited_response_is_http_status() {
        let (base, _head) = serve_once("429 Too Many Requests", "null".to_string()).await;
        let source = test_source(&format!("{}/market/priceoverview/", base));
        let item = ItemIdentifier::new("AWP | Dragon Lore (Field-Tested)").unwrap();

        let err = source.quote(&item).await.unwrap_err();
        assert!(
            matches!(err, SourceError::HttpStatus { status: 429, .. }),
            "unexpected error: {err}"
        );
        assert!(err.is_transport());
    }
}
