//! fuel-price CLI
//!
//! Compute regulated fuel prices and lagged price series from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Price structure for a given quote and exchange rate
//! fuel-price calculate --quote 800 --rate 9.3
//!
//! # Historical and forecast series from a feed file
//! fuel-price series --input feed.json --today 2025-01-31
//!
//! # Generate a synthetic feed
//! fuel-price generate --days 30 --output feed.json
//! ```
//!
//! Set `RUST_LOG=debug` to see skipped series offsets.

use chrono::{Local, NaiveDate};
use fuel_price_engine::core::params::{CalculationParams, ParamsOverride, DEFAULT_PARAMS};
use fuel_price_engine::feed::provider::{into_raw_items, JsonFileFeed, PriceFeedProvider, PriceFeedResponse};
use fuel_price_engine::feed::synthetic::{SyntheticFeed, SyntheticFeedConfig};
use fuel_price_engine::pricing::engine::PricingEngine;
use fuel_price_engine::series::builder::{HistoryPoint, SeriesConfig};
use fuel_price_engine::series::summary::SeriesSummary;
use fuel_price_engine::session::PricingSession;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fuel-price — regulated fuel price calculation and forecasting

USAGE:
    fuel-price <COMMAND> [OPTIONS]

COMMANDS:
    calculate   Compute the full price structure for one parameter set
    series      Build the historical/forecast price series from a feed
    generate    Generate a synthetic price feed (for testing)
    help        Show this message

OPTIONS (calculate):
    --quote <N>         Commodity quote, USD per ton
    --rate <N>          Exchange rate, local currency per USD
    --params <FILE>     JSON file with parameter overrides
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (series):
    --input <FILE>      Feed JSON file ({{"items": [...], "count": n}})
    --synthetic         Use a synthetic feed instead of --input
    --today <DATE>      Reference date, YYYY-MM-DD (default: local today)
    --history <N>       Days of history (default: 15)
    --forecast <N>      Days of forecast (default: 15)
    --lag <N>           Commodity price lag in days (default: 15)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --today <DATE>      Last sample date (default: local today)
    --days <N>          Days of history before today (default: 30)
    --seed <N>          Seed for reproducible output
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    fuel-price calculate --quote 800 --rate 9.3
    fuel-price calculate --params params.json --format json
    fuel-price series --input feed.json --today 2025-01-31
    fuel-price series --synthetic --lag 10 --format json
    fuel-price generate --days 45 --seed 7 --output feed.json"#
    );
}

#[derive(serde::Serialize)]
struct SeriesOutput {
    today: NaiveDate,
    config: SeriesConfig,
    params: CalculationParams,
    final_price: Decimal,
    summary: SeriesSummary,
    points: Vec<HistoryPoint>,
}

fn value_after(args: &[String], i: usize, what: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires {}", args[i - 1], what);
        process::exit(1);
    })
}

fn parse_decimal(raw: &str, flag: &str) -> Decimal {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid number for {} '{}': {}", flag, raw, e);
        process::exit(1);
    })
}

fn parse_days(raw: &str, flag: &str) -> u32 {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("{} requires a non-negative number of days, got '{}'", flag, raw);
        process::exit(1);
    })
}

fn parse_date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|e| {
        eprintln!("Invalid date '{}': {} (expected YYYY-MM-DD)", raw, e);
        process::exit(1);
    })
}

fn parse_format(raw: String) -> String {
    if raw != "text" && raw != "json" {
        eprintln!("--format requires 'text' or 'json', got '{}'", raw);
        process::exit(1);
    }
    raw
}

fn load_overrides(path: &str) -> ParamsOverride {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });
    let overrides: ParamsOverride = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing parameter overrides: {}", e);
        eprintln!("Expected format:");
        eprintln!(r#"{{ "cotation": "800", "taux": "9.3", "tva": "10" }}"#);
        process::exit(1);
    });
    if overrides.is_empty() {
        eprintln!("Warning: '{}' sets no known parameter, using defaults", path);
    }
    overrides
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

fn cmd_calculate(args: &[String]) {
    let mut overrides = ParamsOverride::default();
    let mut file_overrides = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--quote" => {
                i += 1;
                let raw = value_after(args, i, "a number");
                overrides.commodity_quote = Some(parse_decimal(&raw, "--quote"));
            }
            "--rate" => {
                i += 1;
                let raw = value_after(args, i, "a number");
                overrides.exchange_rate = Some(parse_decimal(&raw, "--rate"));
            }
            "--params" => {
                i += 1;
                file_overrides = Some(load_overrides(&value_after(args, i, "a file path")));
            }
            "--format" => {
                i += 1;
                format = parse_format(value_after(args, i, "'text' or 'json'"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    // Command-line values win over the file.
    let mut params = DEFAULT_PARAMS;
    if let Some(from_file) = file_overrides {
        params = params.with_overrides(&from_file);
    }
    let params = params.with_overrides(&overrides);
    let result = PricingEngine::calculate(&params);

    if format == "json" {
        #[derive(serde::Serialize)]
        struct CalculateOutput {
            params: CalculationParams,
            result: fuel_price_engine::core::result::CalculationResult,
        }
        println!("{}", to_json(&CalculateOutput { params, result }));
    } else {
        println!("Quote: {} USD/t   Rate: {}", params.commodity_quote, params.exchange_rate);
        println!("{}", result);
    }
}

fn cmd_series(args: &[String]) {
    let mut input_path = None;
    let mut synthetic = false;
    let mut today = Local::now().date_naive();
    let mut config = SeriesConfig::default();
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(value_after(args, i, "a file path"));
            }
            "--synthetic" => synthetic = true,
            "--today" => {
                i += 1;
                today = parse_date(&value_after(args, i, "a date"));
            }
            "--history" => {
                i += 1;
                config.history_days = parse_days(&value_after(args, i, "a number"), "--history");
            }
            "--forecast" => {
                i += 1;
                config.forecast_days = parse_days(&value_after(args, i, "a number"), "--forecast");
            }
            "--lag" => {
                i += 1;
                config.lag_days = parse_days(&value_after(args, i, "a number"), "--lag");
            }
            "--format" => {
                i += 1;
                format = parse_format(value_after(args, i, "'text' or 'json'"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let (provider, source): (Box<dyn PriceFeedProvider>, String) = match (input_path, synthetic) {
        (Some(path), false) => {
            let feed = JsonFileFeed::new(path);
            let source = format!("'{}'", feed.path().display());
            let provider: Box<dyn PriceFeedProvider> = Box::new(feed);
            (provider, source)
        }
        (None, true) => {
            let days_back = config
                .history_days
                .max(config.forecast_days)
                .saturating_add(config.lag_days);
            let feed = SyntheticFeed::new(SyntheticFeedConfig {
                days_back,
                ..SyntheticFeedConfig::new(today)
            });
            let provider: Box<dyn PriceFeedProvider> = Box::new(feed);
            (provider, "synthetic feed".to_string())
        }
        _ => {
            eprintln!("Error: exactly one of --input <FILE> or --synthetic is required");
            process::exit(1);
        }
    };

    let mut session = PricingSession::new(config);
    if let Err(e) = session.refresh(provider.as_ref(), today) {
        eprintln!("Error loading {}: {}", source, e);
        process::exit(1);
    }

    let summary = SeriesSummary::from_points(session.history());

    if format == "json" {
        let output = SeriesOutput {
            today,
            config,
            params: *session.params(),
            final_price: session.final_price(),
            summary,
            points: session.history().to_vec(),
        };
        println!("{}", to_json(&output));
    } else {
        println!(
            "Series around {} (-{} / +{} days, lag {} days)\n",
            today, config.history_days, config.forecast_days, config.lag_days
        );
        for point in session.history() {
            println!(
                "  {}  {:>10}  {}",
                point.timestamp,
                point.price,
                if point.is_forecast { "forecast" } else { "" }
            );
        }
        match SeriesSummary::span(session.history()) {
            Some((first, last)) => println!("\n  span {} .. {}", first, last),
            None => println!("  (no points: feed does not cover the window)"),
        }
        println!();
        println!("{}", summary);
        println!(
            "Live params: quote {} USD/t, rate {} -> final price {}",
            session.params().commodity_quote,
            session.params().exchange_rate,
            session.final_price()
        );
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = SyntheticFeedConfig::new(Local::now().date_naive());
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--today" => {
                i += 1;
                config.today = parse_date(&value_after(args, i, "a date"));
            }
            "--days" => {
                i += 1;
                config.days_back = parse_days(&value_after(args, i, "a number"), "--days");
            }
            "--seed" => {
                i += 1;
                let raw = value_after(args, i, "a number");
                config.seed = Some(raw.parse().unwrap_or_else(|_| {
                    eprintln!("--seed requires a number, got '{}'", raw);
                    process::exit(1);
                }));
            }
            "--output" => {
                i += 1;
                output_path = Some(value_after(args, i, "a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let feed = SyntheticFeed::new(config);
    let response = PriceFeedResponse::new(feed.generate());

    // Validate before writing so the file is always loadable.
    if let Err(e) = into_raw_items(&response.items) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let json = to_json(&response);

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} daily samples ending {} → {}",
            response.count,
            feed.config().today,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "calculate" => cmd_calculate(rest),
        "series" => cmd_series(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
