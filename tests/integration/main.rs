//! Integration tests for the arbitrage scout.
//!
//! The live tests hit the real marketplaces and are ignored by default.
//! Run with: cargo test --test integration -- --ignored
//!
//! Buff163 tests additionally require a BUFF_SESSION environment variable.

use rust_decimal_macros::dec;
use skin_arb::arbitrage::{FeeRate, MarketScout, ScanStatus, Scout, Verdict};
use skin_arb::catalog::{parse_selection, ItemCatalog, Selection};
use skin_arb::config::Config;
use skin_arb::market::{
    build_http_client, BuffSource, ItemIdentifier, Marketplace, MockOutcome, MockPriceSource,
    PriceSource, SteamSource,
};
use skin_arb::report::render_text;

const CATALOG: &str = "AWP | Redline (Field-Tested)\n\
                       AWP | Redline (Minimal Wear)\n\
                       AK-47 | Redline (Field-Tested)\n";

/// Get a live config from environment, if a Buff163 session is available.
fn live_config() -> Option<Config> {
    dotenvy::dotenv().ok();

    let config = Config::load().ok()?;
    if config.buff_session.trim().is_empty() {
        return None;
    }
    Some(config)
}

fn steam_buff_fees() -> (FeeRate, FeeRate) {
    (
        FeeRate::new(dec!(0.1304)).unwrap(),
        FeeRate::new(dec!(0.025)).unwrap(),
    )
}

/// Search, select and scan, with mocked marketplaces.
#[tokio::test]
async fn search_select_and_scan_pipeline() {
    let catalog = ItemCatalog::from_text(CATALOG);
    let matches = catalog.search("awp | redline");
    assert_eq!(matches.len(), 2);

    let item = match parse_selection("1", &matches) {
        Selection::Item(item) => item,
        other => panic!("unexpected selection: {other:?}"),
    };
    assert_eq!(item.as_str(), "AWP | Redline (Field-Tested)");

    let (steam_fee, buff_fee) = steam_buff_fees();
    let scout = Scout::new(
        MockPriceSource::quoting(Marketplace::Steam, dec!(100.00), 40),
        MockPriceSource::quoting(Marketplace::Buff, dec!(70.00), 512),
        steam_fee,
        buff_fee,
    );

    let report = scout.scan(&item).await;

    assert_eq!(report.status(), ScanStatus::Profitable);
    assert_eq!(report.result.unwrap().verdict(), Verdict::Profit(dec!(18.71)));
    assert!(render_text(&report).contains("Profit: $18.71 (26.7% ROI)"));
}

/// Empty Buff163 result set: no quote, no calculation, explicit status.
#[tokio::test]
async fn empty_buff_listing_produces_no_result() {
    let (steam_fee, buff_fee) = steam_buff_fees();
    let steam = MockPriceSource::quoting(Marketplace::Steam, dec!(8.40), 3);
    let scout = Scout::new(
        steam.clone(),
        MockPriceSource::failing(Marketplace::Buff, MockOutcome::NoListings),
        steam_fee,
        buff_fee,
    );

    let item = ItemIdentifier::new("AK-47 | Redline (Field-Tested)").unwrap();
    let report = scout.scan(&item).await;

    assert_eq!(report.status(), ScanStatus::InsufficientData);
    assert!(report.result.is_none());
    assert!(report.source.is_ok());
    assert_eq!(steam.calls(), 1);
}

/// Unreachable marketplaces degrade to missing quotes without panicking.
#[tokio::test]
async fn unreachable_marketplaces_degrade_gracefully() {
    let config = Config {
        buff_session: "not-a-real-session".to_string(),
        buff_api_url: "http://127.0.0.1:1/api/market/goods".to_string(),
        steam_api_url: "http://127.0.0.1:1/market/priceoverview/".to_string(),
        http_timeout_ms: 2_000,
        http_connect_timeout_ms: 1_000,
        ..Config::default()
    };
    let scout = MarketScout::from_config(&config).unwrap();

    let item = ItemIdentifier::new("AWP | Redline (Field-Tested)").unwrap();
    let report = scout.scan(&item).await;

    assert_eq!(report.status(), ScanStatus::InsufficientData);
    let failures = report.failures();
    assert_eq!(failures.len(), 2);
    assert!(failures.iter().all(|e| e.is_transport()));
}

/// Live Steam price overview lookup.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_live_steam_quote() {
    dotenvy::dotenv().ok();
    let config = Config::load().unwrap_or_default();
    let source = SteamSource::new(build_http_client(&config).unwrap(), &config);

    let item = ItemIdentifier::new("AK-47 | Redline (Field-Tested)").unwrap();
    let quote = source.quote(&item).await;
    assert!(quote.is_ok(), "Steam lookup failed: {:?}", quote.err());

    let quote = quote.unwrap();
    assert!(quote.price() > dec!(0));
    println!("Steam: ${} (volume {})", quote.price(), quote.volume());
}

/// Live Buff163 goods search.
#[tokio::test]
#[ignore = "requires BUFF_SESSION"]
async fn test_live_buff_quote() {
    let config = match live_config() {
        Some(c) => c,
        None => {
            println!("Skipping: BUFF_SESSION not set");
            return;
        }
    };
    let source = BuffSource::new(build_http_client(&config).unwrap(), &config);

    let item = ItemIdentifier::new("AK-47 | Redline (Field-Tested)").unwrap();
    let quote = source.quote(&item).await;
    assert!(quote.is_ok(), "Buff163 lookup failed: {:?}", quote.err());
    println!("Buff163: ${}", quote.unwrap().price());
}

/// Live end-to-end scan.
#[tokio::test]
#[ignore = "requires BUFF_SESSION"]
async fn test_live_scan() {
    let config = match live_config() {
        Some(c) => c,
        None => {
            println!("Skipping: BUFF_SESSION not set");
            return;
        }
    };
    let scout = MarketScout::from_config(&config).unwrap();

    let item = ItemIdentifier::new("AK-47 | Redline (Field-Tested)").unwrap();
    let report = scout.scan(&item).await;
    print!("{}", render_text(&report));
}
