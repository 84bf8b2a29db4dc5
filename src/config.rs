//! Application configuration loaded from environment variables.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::arbitrage::FeeRate;
use crate::error::ArbitrageError;

/// Application configuration loaded from environment variables.
///
/// Built once at startup and shared read-only with the price sources.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Buff163 ===
    /// Buff163 `session` cookie value.
    #[serde(default)]
    pub buff_session: String,

    /// Buff163 goods search endpoint.
    #[serde(default = "default_buff_api_url")]
    pub buff_api_url: String,

    /// Buff163 game filter.
    #[serde(default = "default_buff_game")]
    pub buff_game: String,

    // === Steam Community Market ===
    /// Steam price overview endpoint.
    #[serde(default = "default_steam_api_url")]
    pub steam_api_url: String,

    /// Steam app id (730 = CS2).
    #[serde(default = "default_steam_app_id")]
    pub steam_app_id: u32,

    /// Steam currency code (1 = USD).
    #[serde(default = "default_steam_currency")]
    pub steam_currency: u32,

    // === Fees and Currency ===
    /// Steam transaction fee as a fraction (e.g., 0.1304).
    #[serde(default = "default_steam_fee")]
    pub steam_fee: Decimal,

    /// Buff163 transaction fee as a fraction (e.g., 0.025).
    #[serde(default = "default_buff_fee")]
    pub buff_fee: Decimal,

    /// CNY to USD conversion rate.
    #[serde(default = "default_cny_to_usd")]
    pub cny_to_usd: Decimal,

    // === HTTP ===
    /// Total request timeout in milliseconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_ms: u64,

    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub http_connect_timeout_ms: u64,

    /// User agent sent to both marketplaces.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    // === Item Catalog ===
    /// Newline-delimited item name file.
    #[serde(default = "default_item_names_path")]
    pub item_names_path: String,

    /// Maximum number of search matches offered for selection.
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

fn default_buff_api_url() -> String {
    "https://buff.163.com/api/market/goods".to_string()
}

fn default_buff_game() -> String {
    "csgo".to_string()
}

fn default_steam_api_url() -> String {
    "https://steamcommunity.com/market/priceoverview/".to_string()
}

fn default_steam_app_id() -> u32 {
    730
}

fn default_steam_currency() -> u32 {
    1
}

fn default_steam_fee() -> Decimal {
    Decimal::new(1304, 4) // 0.1304
}

fn default_buff_fee() -> Decimal {
    Decimal::new(25, 3) // 0.025
}

fn default_cny_to_usd() -> Decimal {
    Decimal::ONE / Decimal::new(72, 1) // 1 / 7.2
}

fn default_http_timeout() -> u64 {
    10_000
}

fn default_connect_timeout() -> u64 {
    3_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_item_names_path() -> String {
    "730_ItemNames.txt".to_string()
}

fn default_max_matches() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buff_session: String::new(),
            buff_api_url: default_buff_api_url(),
            buff_game: default_buff_game(),
            steam_api_url: default_steam_api_url(),
            steam_app_id: default_steam_app_id(),
            steam_currency: default_steam_currency(),
            steam_fee: default_steam_fee(),
            buff_fee: default_buff_fee(),
            cny_to_usd: default_cny_to_usd(),
            http_timeout_ms: default_http_timeout(),
            http_connect_timeout_ms: default_connect_timeout(),
            user_agent: default_user_agent(),
            item_names_path: default_item_names_path(),
            max_matches: default_max_matches(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.buff_session.trim().is_empty() {
            return Err("BUFF_SESSION is required".to_string());
        }

        self.steam_fee_rate()
            .map_err(|e| format!("STEAM_FEE: {}", e))?;
        self.buff_fee_rate()
            .map_err(|e| format!("BUFF_FEE: {}", e))?;

        if self.cny_to_usd <= Decimal::ZERO {
            return Err("CNY_TO_USD must be positive".to_string());
        }

        if self.http_timeout_ms == 0 || self.http_connect_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS and HTTP_CONNECT_TIMEOUT_MS must be positive".to_string());
        }

        for (name, value) in [
            ("BUFF_API_URL", &self.buff_api_url),
            ("STEAM_API_URL", &self.steam_api_url),
        ] {
            url::Url::parse(value).map_err(|e| format!("{} is not a valid url: {}", name, e))?;
        }

        if self.max_matches == 0 {
            return Err("MAX_MATCHES must be at least 1".to_string());
        }

        Ok(())
    }

    /// Steam fee as a validated rate.
    pub fn steam_fee_rate(&self) -> Result<FeeRate, ArbitrageError> {
        FeeRate::new(self.steam_fee)
    }

    /// Buff163 fee as a validated rate.
    pub fn buff_fee_rate(&self) -> Result<FeeRate, ArbitrageError> {
        FeeRate::new(self.buff_fee)
    }

    /// Total request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.http_connect_timeout_ms)
    }
}
