//! HttpCandleHost 통합 테스트 (mockito 서버 사용).

use chrono::{TimeZone, Utc};
use mockito::Matcher;
use relay_core::{CachedRange, CandleSize, ImportConfig, Market, RemoteConfig, TimeRange};
use relay_data::{CandleHost, DataError, HttpCandleHost, RangeStreamer};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;

fn market() -> Market {
    Market::new("binance", "USDT", "BTC")
}

fn watch_json() -> serde_json::Value {
    json!({"exchange": "binance", "currency": "USDT", "asset": "BTC"})
}

fn host_for(server: &mockito::ServerGuard, import_timeout_secs: u64) -> HttpCandleHost {
    let config = RemoteConfig {
        base_url: server.url(),
        request_timeout_secs: 5,
        import_poll_interval_ms: 5,
        import_timeout_secs,
    };
    HttpCandleHost::new(&config).unwrap()
}

fn window() -> TimeRange {
    TimeRange::new(
        Utc.with_ymd_and_hms(2019, 2, 2, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2019, 2, 2, 0, 3, 0).unwrap(),
    )
}

const CANDLES_JSON: &str = r#"[
    {"start": 1549065600, "open": 3400, "high": 3402, "low": 3399, "close": 3401, "vwp": 3400.5, "volume": 1.5, "trades": 10},
    {"start": 1549065660, "open": 3401, "high": 3403, "low": 3400, "close": 3402, "vwp": 3401.5, "volume": 2, "trades": 12},
    {"start": 1549065720, "open": 3402, "high": 3404, "low": 3401, "close": 3403, "vwp": 3402.5, "volume": 0.5, "trades": 3},
    {"start": 1549065780, "open": 3403, "high": 3405, "low": 3402, "close": 3404, "vwp": 3403.5, "volume": 4, "trades": 21}
]"#;

#[tokio::test]
async fn test_scan_ranges_posts_watch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/scan")
        .match_body(Matcher::Json(json!({"watch": watch_json()})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"from": 1549199520, "to": 1556885520}, {"from": 1549066320, "to": 1549149120}]"#)
        .create_async()
        .await;

    let ranges = host_for(&server, 5).scan_ranges(&market()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        ranges,
        vec![
            CachedRange::new(1549199520, 1556885520),
            CachedRange::new(1549066320, 1549149120),
        ]
    );
}

#[tokio::test]
async fn test_fetch_candles_posts_daterange_and_size() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/getCandles")
        .match_body(Matcher::Json(json!({
            "watch": watch_json(),
            "daterange": {"from": "2019-02-02T00:00:00Z", "to": "2019-02-02T00:03:00Z"},
            "candleSize": 5
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CANDLES_JSON)
        .create_async()
        .await;

    let candles = host_for(&server, 5)
        .fetch_candles(window(), CandleSize::M5, &market())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(candles.len(), 4);
    assert_eq!(candles[0].start, window().start);
    assert_eq!(candles[0].vwp, dec!(3400.5));
    assert_eq!(candles[3].start, window().end);
    assert_eq!(candles[3].trades, 21);
}

#[tokio::test]
async fn test_import_and_wait_finishes_when_import_leaves_list() {
    let mut server = mockito::Server::new_async().await;
    let start = server
        .mock("POST", "/api/import")
        .match_body(Matcher::Json(json!({
            "watch": watch_json(),
            "importer": {"daterange": {"from": "2019-02-02T00:00:00Z", "to": "2019-02-02T00:03:00Z"}},
            "candleWriter": {"enabled": true}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "imp-1"}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/api/imports")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "other", "done": false}]"#)
        .create_async()
        .await;

    host_for(&server, 5)
        .import_and_wait(window(), &market())
        .await
        .unwrap();

    start.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn test_import_and_wait_accepts_done_flag() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/import")
        .with_status(200)
        .with_body(r#"{"id": "imp-1"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/imports")
        .with_status(200)
        .with_body(r#"[{"id": "imp-1", "done": true}]"#)
        .create_async()
        .await;

    let result = host_for(&server, 5).import_and_wait(window(), &market()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_import_error_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/import")
        .with_status(200)
        .with_body(r#"{"id": 7}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/imports")
        .with_status(200)
        .with_body(r#"[{"id": 7, "done": false, "error": "exchange rejected request"}]"#)
        .create_async()
        .await;

    let result = host_for(&server, 5).import_and_wait(window(), &market()).await;
    match result {
        Err(DataError::ImportFailed(message)) => {
            assert!(message.contains("exchange rejected request"))
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_import_wait_times_out() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/import")
        .with_status(200)
        .with_body(r#"{"id": "imp-1"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/imports")
        .with_status(200)
        .with_body(r#"[{"id": "imp-1", "done": false}]"#)
        .create_async()
        .await;

    let result = host_for(&server, 0).import_and_wait(window(), &market()).await;
    assert!(matches!(result, Err(DataError::Timeout(_))));
}

#[tokio::test]
async fn test_non_success_status_is_remote_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/scan")
        .with_status(500)
        .with_body("scan exploded")
        .create_async()
        .await;

    let result = host_for(&server, 5).scan_ranges(&market()).await;
    match result {
        Err(DataError::Remote { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("scan exploded"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/getCandles")
        .with_status(200)
        .with_body(r#"{"not": "a list"}"#)
        .create_async()
        .await;

    let result = host_for(&server, 5)
        .fetch_candles(window(), CandleSize::M1, &market())
        .await;
    assert!(matches!(result, Err(DataError::Parse(_))));
}

#[tokio::test]
async fn test_streamer_over_http_skips_import_for_cached_window() {
    let mut server = mockito::Server::new_async().await;
    let scan = server
        .mock("POST", "/api/scan")
        .with_status(200)
        .with_body(r#"[{"from": 1549000000, "to": 1549100000}]"#)
        .create_async()
        .await;
    let candles = server
        .mock("POST", "/api/getCandles")
        .with_status(200)
        .with_body(CANDLES_JSON)
        .expect(1)
        .create_async()
        .await;
    let import = server
        .mock("POST", "/api/import")
        .expect(0)
        .create_async()
        .await;

    let host = Arc::new(host_for(&server, 5));
    let streamer = RangeStreamer::new(host, market(), ImportConfig::default());

    let mut received = 0;
    let summary = streamer
        .stream(window().start, window().end, |batch| received += batch.len())
        .await
        .unwrap();

    scan.assert_async().await;
    candles.assert_async().await;
    import.assert_async().await;
    assert_eq!(received, 4);
    assert_eq!(summary.batches, 1);
    assert_eq!(summary.cursor, window().end);
}
