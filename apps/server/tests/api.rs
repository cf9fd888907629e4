use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use stockjournal_server::{api::app_router, build_state, config::Config, AppState};
use tempfile::tempdir;
use tower::ServiceExt;

async fn app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = build_state(&config).await.unwrap();
    (app_router(state.clone(), &config), state)
}

async fn app() -> Router {
    app_with(Config::with_defaults()).await.0
}

async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if uri.ends_with("/transactions") || uri.ends_with("/batch") {
        builder = builder.header("content-type", "application/json");
    }
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, Body::from(body.to_string())).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::GET, uri, Body::empty()).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn trade(date: &str, ticker: &str, kind: &str, price: &str, quantity: i64) -> Value {
    json!({
        "date": date,
        "ticker": ticker,
        "transactionType": kind,
        "price": price,
        "quantity": quantity,
        "feeRate": "0",
        "vatRate": "0"
    })
}

fn decimal(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().unwrap(),
        other => other.as_f64().unwrap(),
    }
}

#[tokio::test]
async fn healthz_works() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/healthz", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = app().await;
    let (status, body) = get_json(&app, "/api/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn records_trades_and_reports_portfolio() {
    let app = app().await;

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/v1/transactions",
        trade("2024-01-02", "aapl", "Buy", "150", 10),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["ticker"], "AAPL");
    assert_eq!(created["broker"], "Other");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/v1/transactions",
        trade("2024-01-10", "AAPL", "Sell", "155", 3),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, holdings) = get_json(&app, "/api/v1/holdings").await;
    assert_eq!(holdings[0]["shares"], 7);
    assert_eq!(decimal(&holdings[0]["currentValue"]), 1085.0);
    assert_eq!(decimal(&holdings[0]["profitLoss"]), 35.0);

    let (_, report) = get_json(&app, "/api/v1/portfolio/report").await;
    assert_eq!(decimal(&report[0]["realizedProfitLoss"]), 15.0);
    assert_eq!(decimal(&report[0]["totalProfitLoss"]), 50.0);

    let (_, summary) = get_json(&app, "/api/v1/portfolio/summary").await;
    assert_eq!(summary["totalTransactions"], 2);
    assert_eq!(summary["totalSells"], 1);

    let (_, series) = get_json(&app, "/api/v1/portfolio/performance").await;
    assert_eq!(series.as_array().unwrap().len(), 2);
    assert_eq!(series[1]["date"], "2024-01-10");

    let (_, allocation) = get_json(&app, "/api/v1/portfolio/allocation").await;
    assert_eq!(decimal(&allocation[0]["weightPct"]), 100.0);

    let (_, sells) = get_json(&app, "/api/v1/transactions?type=Sell").await;
    assert_eq!(sells.as_array().unwrap().len(), 1);

    let (_, summary_rows) = get_json(&app, "/api/v1/transactions/summary").await;
    assert_eq!(summary_rows[0]["netShares"], 7);
}

#[tokio::test]
async fn oversell_is_rejected_with_400() {
    let app = app().await;
    send_json(
        &app,
        Method::POST,
        "/api/v1/transactions",
        trade("2024-01-02", "AAPL", "Buy", "100", 5),
    )
    .await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/transactions",
        trade("2024-01-03", "AAPL", "Sell", "110", 10),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Insufficient shares"));

    let (_, rows) = get_json(&app, "/api/v1/transactions").await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn batch_reports_rejected_rows() {
    let app = app().await;
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/transactions/batch",
        json!([
            trade("2024-01-02", "TSLA", "Buy", "200", 2),
            trade("2024-01-03", "TSLA", "Sell", "210", 3),
            trade("2024-01-03", "TSLA", "Sell", "210", 2),
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"].as_array().unwrap().len(), 2);
    assert_eq!(body["rejected"][0]["index"], 1);
}

#[tokio::test]
async fn oversized_trade_is_400_and_service_keeps_working() {
    let app = app().await;
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/transactions",
        trade("2024-01-02", "AAPL", "Buy", "100000000000000000000", 10_000_000_000),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("must not exceed"));

    let (status, holdings) = get_json(&app, "/api/v1/holdings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(holdings.as_array().unwrap().is_empty());

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/v1/transactions",
        trade("2024-01-03", "AAPL", "Buy", "150", 10),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_import_is_422_and_commits_nothing() {
    let app = app().await;
    let csv = "Date,Ticker,Price\n2024-01-02,AAPL,150\n";
    let (status, bytes) = send(
        &app,
        Method::POST,
        "/api/v1/transactions/import",
        Body::from(csv),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].as_str().unwrap().contains("Quantity"));

    let (_, rows) = get_json(&app, "/api/v1/transactions").await;
    assert!(rows.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn export_restore_and_clear() {
    let app = app().await;
    let csv = "Date,Ticker,Transaction Type,Price,Quantity\n\
               2024-01-02,AAPL,Buy,150,10\n\
               2024-01-05,MSFT,Buy,400,2\n";
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/transactions/import",
        Body::from(csv),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, exported) =
        send(&app, Method::GET, "/api/v1/transactions/export", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    let exported = String::from_utf8(exported).unwrap();
    assert!(exported.starts_with("Date,Ticker,Transaction Type"));

    let (status, cleared) = send_json(&app, Method::DELETE, "/api/v1/transactions", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["removed"], 2);

    let (status, restored) = send(
        &app,
        Method::POST,
        "/api/v1/transactions/restore?mode=replace",
        Body::from(exported.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let restored: Value = serde_json::from_slice(&restored).unwrap();
    assert_eq!(restored["restored"], 2);
    assert_eq!(restored["mode"], "replace");

    let (_, again) = send(&app, Method::GET, "/api/v1/transactions/export", Body::empty()).await;
    assert_eq!(String::from_utf8(again).unwrap(), exported);
}

#[tokio::test]
async fn loads_ledger_file_at_startup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    std::fs::write(
        &path,
        "Date,Ticker,Transaction Type,Price,Quantity,Total\n2024-01-02,KO,Buy,60,3,180\n",
    )
    .unwrap();

    let mut config = Config::with_defaults();
    config.ledger_path = Some(path);
    let (app, state) = app_with(config).await;

    assert_eq!(state.ledger_service.snapshot().unwrap().len(), 1);
    let (_, holdings) = get_json(&app, "/api/v1/holdings").await;
    assert_eq!(holdings[0]["ticker"], "KO");
}

#[tokio::test]
async fn settings_expose_default_rates() {
    let app = app().await;
    let (status, settings) = get_json(&app, "/api/v1/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&settings["defaultFeeRate"]), 0.0016);
    assert_eq!(settings["defaultBroker"], "Other");
}
