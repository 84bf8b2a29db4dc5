//! CS2 skin arbitrage scout entry point.

use std::io::Write;
use std::path::Path;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skin_arb::arbitrage::MarketScout;
use skin_arb::catalog::{parse_selection, ItemCatalog, Selection};
use skin_arb::config::Config;
use skin_arb::error::CatalogError;
use skin_arb::market::ItemIdentifier;
use skin_arb::metrics;
use skin_arb::report::{render_json, render_text};

/// CS2 skin arbitrage scout.
#[derive(Parser, Debug)]
#[command(name = "skin-arb")]
#[command(about = "Compare CS2 item prices between Steam and Buff163 after fees")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print collected metrics in Prometheus format before exiting.
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the item catalog, pick an item and compare prices (default).
    Scan,

    /// Compare prices for an exact item name.
    Quote {
        /// Market hash name, e.g. "AWP | Redline (Field-Tested)".
        item: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List catalog entries matching a query.
    Search {
        /// Case-insensitive substring to look for.
        query: String,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the report
    let filter = if args.verbose {
        EnvFilter::new("skin_arb=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let prometheus = if args.metrics {
        Some(metrics::install_prometheus_recorder()?)
    } else {
        None
    };

    let outcome = match args.command {
        Some(Command::Quote { item, json }) => cmd_quote(&item, json).await,
        Some(Command::Search { query }) => cmd_search(&query).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Scan) | None => cmd_scan().await,
    };

    if let Some(handle) = prometheus {
        println!("{}", handle.render());
    }

    outcome
}

/// Load and validate configuration.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Load the item catalog, printing a message when it is missing.
async fn load_catalog(path: &str) -> anyhow::Result<Option<ItemCatalog>> {
    match ItemCatalog::load(Path::new(path)).await {
        Ok(catalog) => Ok(Some(catalog)),
        Err(e @ CatalogError::NotFound { .. }) => {
            println!("Error: {}.", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Print a prompt and read one line. `None` on end of input.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>, text: &str) -> anyhow::Result<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

/// Interactive search, select and compare loop.
async fn cmd_scan() -> anyhow::Result<()> {
    let config = load_config()?;
    let Some(catalog) = load_catalog(&config.item_names_path).await? else {
        return Ok(());
    };
    let scout = MarketScout::from_config(&config)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(query) = prompt(&mut lines, "\nSearch Item (e.g., 'awp | redline'): ").await? else {
            break;
        };
        let query = query.trim();
        if query.is_empty() {
            break;
        }

        let matches = catalog.search(query);
        if matches.is_empty() {
            println!("No items found.");
            continue;
        }

        let listed = &matches[..matches.len().min(config.max_matches)];
        for (i, name) in listed.iter().enumerate() {
            println!("{}. {}", i + 1, name);
        }
        if matches.len() > listed.len() {
            println!("... and {} more, refine your search", matches.len() - listed.len());
        }

        let Some(choice) = prompt(&mut lines, "\nSelect item number (or 'q'): ").await? else {
            break;
        };

        match parse_selection(&choice, listed) {
            Selection::Item(item) => {
                let report = scout.scan(&item).await;
                println!();
                print!("{}", render_text(&report));
            }
            Selection::Cancelled | Selection::Invalid => {
                println!("Search cancelled or invalid input.");
            }
        }
    }

    Ok(())
}

/// Compare prices for one exact item.
async fn cmd_quote(item: &str, json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let item = ItemIdentifier::new(item)?;
    let scout = MarketScout::from_config(&config)?;

    let report = scout.scan(&item).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&render_json(&report))?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}

/// List catalog matches without quoting.
async fn cmd_search(query: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let Some(catalog) = load_catalog(&config.item_names_path).await? else {
        return Ok(());
    };

    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    for (i, name) in matches.iter().take(config.max_matches).enumerate() {
        println!("{}. {}", i + 1, name);
    }
    if matches.len() > config.max_matches {
        println!("... and {} more", matches.len() - config.max_matches);
    }

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SKIN ARB - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Buff Session: present");
    println!("  Buff API: {} (game={})", config.buff_api_url, config.buff_game);
    println!(
        "  Steam API: {} (appid={}, currency={})",
        config.steam_api_url, config.steam_app_id, config.steam_currency
    );
    println!("  Steam Fee: {}", config.steam_fee);
    println!("  Buff Fee: {}", config.buff_fee);
    println!("  CNY to USD: {}", config.cny_to_usd.round_dp(6));
    println!("  HTTP Timeout: {}ms", config.http_timeout_ms);
    println!("  Item Catalog: {}", config.item_names_path);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
