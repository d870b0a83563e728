use chrono::{Duration, NaiveDate};
use fuel_price_engine::core::feed_item::RawDataItem;
use fuel_price_engine::core::params::{ParamsOverride, DEFAULT_PARAMS};
use fuel_price_engine::feed::provider::{into_raw_items, JsonFileFeed, PriceFeedProvider, PriceFeedResponse};
use fuel_price_engine::feed::synthetic::{SyntheticFeed, SyntheticFeedConfig};
use fuel_price_engine::pricing::engine::PricingEngine;
use fuel_price_engine::series::builder::{ForecastSeriesBuilder, SeriesConfig};
use fuel_price_engine::series::live::update_current_params;
use fuel_price_engine::series::summary::SeriesSummary;
use fuel_price_engine::session::PricingSession;
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

/// Full pipeline: wire feed → samples → series → live params → result.
#[test]
fn full_pipeline_from_wire_feed() {
    let json = r#"{
        "items": [
            { "date": "2025-01-31", "oil_price": 790.0, "exchange_rate": 9.3 },
            { "date": "2025-01-16", "oil_price": 800.0, "exchange_rate": 9.28 },
            { "date": "2025-01-30", "oil_price": 785.0, "exchange_rate": 9.29 },
            { "date": "2025-01-15", "oil_price": 770.0, "exchange_rate": 9.27 }
        ],
        "count": 4
    }"#;
    let response: PriceFeedResponse = serde_json::from_str(json).unwrap();
    let feed = into_raw_items(&response.items).unwrap();
    assert_eq!(feed.first().unwrap().date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

    let series = ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15);
    // Jan 30 and 31 have a same-day rate and a quote 15 days earlier;
    // forecast Feb 14 and 15 price the quotes of Jan 30 and 31
    assert_eq!(series.len(), 4);
    assert_eq!(series[1].timestamp, today());
    assert!(series[2].is_forecast && series[3].is_forecast);
    assert_eq!(series[3].timestamp, today() + Duration::days(15));
    // 800 USD/t quoted on Jan 16, converted at Jan 31's 9.3
    assert_eq!(series[1].price, dec!(1067.58));

    let live = update_current_params(&feed, today(), 15, &DEFAULT_PARAMS);
    assert_eq!(live.commodity_quote, dec!(800));
    assert_eq!(live.exchange_rate, dec!(9.3));
    assert_eq!(PricingEngine::calculate(&live).final_price, series[1].price);
}

/// Worked example: quote 800 USD/t at 9.3.
#[test]
fn regression_vector_final_price() {
    let params = DEFAULT_PARAMS.with_overrides(&ParamsOverride::market(dec!(800), dec!(9.3)));
    let result = PricingEngine::calculate(&params);
    assert_eq!(result.cost_per_ton, dec!(7922.59));
    assert_eq!(result.retail_with_vat, dec!(1067.58));
    assert_eq!(result.final_price, dec!(1067.58));
}

#[test]
fn single_lagged_pair_yields_one_point() {
    let feed = vec![
        RawDataItem::new(today() - Duration::days(15), dec!(760), dec!(9.2)),
        RawDataItem::new(today(), dec!(790), dec!(9.3)),
    ];
    let series = ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].timestamp, today());
    assert!(!series[0].is_forecast);
}

#[test]
fn synthetic_feed_through_session() {
    let provider = SyntheticFeed::new(SyntheticFeedConfig {
        seed: Some(2025),
        ..SyntheticFeedConfig::new(today())
    });
    let mut session = PricingSession::new(SeriesConfig::default());
    session.refresh(&provider, today()).unwrap();

    let summary = SeriesSummary::from_points(session.history());
    assert_eq!(summary.historical_points, 16);
    assert_eq!(summary.forecast_points, 15);
    assert_eq!(summary.current.unwrap().timestamp, today());
    assert_eq!(summary.horizon.unwrap().timestamp, today() + Duration::days(15));
}

#[test]
fn json_file_feed_round_trip() {
    let entries = SyntheticFeed::new(SyntheticFeedConfig {
        seed: Some(1),
        days_back: 20,
        ..SyntheticFeedConfig::new(today())
    })
    .generate();
    let path = std::env::temp_dir().join(format!("fuel-feed-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&PriceFeedResponse::new(entries.clone())).unwrap())
        .unwrap();

    let loaded = JsonFileFeed::new(&path).fetch().unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, entries);
}

#[test]
fn malformed_feed_file_is_reported() {
    let path = std::env::temp_dir().join(format!("fuel-feed-bad-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "items": [ { "date": "soon" } ] }"#).unwrap();
    let result = JsonFileFeed::new(&path).fetch();
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn missing_feed_file_names_its_path() {
    let feed = JsonFileFeed::new(std::env::temp_dir().join("fuel-feed-does-not-exist.json"));
    let err = feed.fetch().unwrap_err();
    assert!(err.to_string().contains(&feed.path().display().to_string()));
}

/// Result records serialize with their field names.
#[test]
fn calculation_result_serializes() {
    let result = PricingEngine::calculate(&DEFAULT_PARAMS.with_commodity_quote(dec!(800)).with_exchange_rate(dec!(9.3)));
    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["final_price"], "1067.58");
    assert!(parsed.get("wholesale_with_vat").is_some());
}
