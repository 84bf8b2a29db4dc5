//! Console and JSON rendering of scan reports.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;

use crate::arbitrage::{ScanReport, Verdict};
use crate::error::SourceError;
use crate::market::{Marketplace, PriceQuote};

/// Round to `dp` places, halves away from zero.
fn rounded(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn quote_line(marketplace: Marketplace, quote: &Result<PriceQuote, SourceError>) -> String {
    match quote {
        Ok(q) => format!(
            "  {:<6} ${:.2} (volume {})",
            format!("{}:", marketplace),
            rounded(q.price(), 2),
            q.volume()
        ),
        Err(e) => format!("  {:<6} unavailable ({})", format!("{}:", marketplace), e),
    }
}

/// Human-readable report, one line per fact.
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Results for {}:", report.item);
    let _ = writeln!(out, "{}", quote_line(report.source_marketplace, &report.source));
    let _ = writeln!(out, "{}", quote_line(report.target_marketplace, &report.target));

    match &report.result {
        Some(result) => {
            let _ = writeln!(
                out,
                "{} Net: ${:.2} | {} Net: ${:.2}",
                report.source_marketplace,
                rounded(result.source_net(), 2),
                report.target_marketplace,
                rounded(result.target_net(), 2)
            );
            match result.verdict() {
                Verdict::Profit(profit) => {
                    let _ = writeln!(
                        out,
                        "Profit: ${:.2} ({:.1}% ROI)",
                        rounded(profit, 2),
                        rounded(result.roi_percent(), 1)
                    );
                }
                Verdict::Loss(loss) => {
                    let _ = writeln!(out, "No Profit (Loss: ${:.2})", rounded(loss, 2));
                }
            }
        }
        None => {
            let missing: Vec<String> = report
                .failures()
                .iter()
                .map(|e| e.marketplace().to_string())
                .collect();
            let _ = writeln!(
                out,
                "Insufficient data: no quote from {}",
                missing.join(" and ")
            );
        }
    }

    out
}

fn quote_json(quote: &Result<PriceQuote, SourceError>) -> Value {
    match quote {
        Ok(q) => json!({ "price": q.price(), "volume": q.volume() }),
        Err(e) => json!({ "error": e.to_string(), "kind": e.kind() }),
    }
}

/// Machine-readable report.
pub fn render_json(report: &ScanReport) -> Value {
    json!({
        "item": report.item.as_str(),
        "status": report.status(),
        "scanned_at": report.scanned_at.format(&Rfc3339).ok(),
        (report.source_marketplace.as_str()): quote_json(&report.source),
        (report.target_marketplace.as_str()): quote_json(&report.target),
        "result": report.result,
    })
}
