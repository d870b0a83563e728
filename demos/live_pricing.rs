//! Live pricing walkthrough.
//!
//! Loads a synthetic feed, builds the price series around today and
//! shows how a manual edit to one parameter moves the pump price.

use chrono::Local;
use fuel_price_engine::feed::synthetic::{SyntheticFeed, SyntheticFeedConfig};
use fuel_price_engine::prelude::*;
use fuel_price_engine::series::summary::SeriesSummary;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  fuel-price-engine: Live Pricing Example ║");
    println!("╚══════════════════════════════════════════╝\n");

    let today = Local::now().date_naive();
    let provider = SyntheticFeed::new(SyntheticFeedConfig {
        seed: Some(42),
        ..SyntheticFeedConfig::new(today)
    });

    // --- Step 1: refresh from the feed ---
    println!("━━━ Step 1: Series from feed ━━━\n");

    let mut session = PricingSession::new(SeriesConfig::default());
    if let Err(e) = session.refresh(&provider, today) {
        eprintln!("Feed error: {}", e);
        return;
    }

    for point in session.history() {
        let marker = if point.is_forecast { "forecast" } else { "" };
        println!("  {}  {:>10}  {}", point.timestamp, point.price, marker);
    }
    println!("\n{}", SeriesSummary::from_points(session.history()));

    // --- Step 2: live price structure ---
    println!("━━━ Step 2: Today's price structure ━━━\n");
    println!(
        "Quote {} USD/t (lagged), rate {}\n",
        session.params().commodity_quote,
        session.params().exchange_rate
    );
    println!("{}", session.result());

    // --- Step 3: what-if on the retail margin ---
    println!("━━━ Step 3: Retail margin +1.00 ━━━\n");
    let before = session.final_price();
    let margin = session.params().retail_margin + dec!(1);
    session.update_params(&ParamsOverride {
        retail_margin: Some(margin),
        ..Default::default()
    });
    println!("Final price: {} → {}", before, session.final_price());
}
