//! Integration tests for the ingestion run against a mocked upstream API

use chrono::NaiveDate;
use goldtrack::{ingest, store::FileStore, upstream::GoldApiClient};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_date() -> NaiveDate {
    "2024-01-03".parse().unwrap()
}

async fn mount_upstream(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/todayPrices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultData": {
                "datas": [
                    {"name": "2024-01-03 09:30:00", "value": ["09:30", "478.12"]},
                    {"name": "2024-01-03 09:31:00", "value": ["09:31", "478.40"]}
                ]
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/latestPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultData": {
                "datas": {
                    "price": "478.40",
                    "yesterdayPrice": "477.00",
                    "upAndDownAmt": "1.40",
                    "upAndDownRate": "0.29%"
                }
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/historyPrices"))
        .and(body_json(json!({"reqData": {"period": "y"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultData": {
                "datas": [
                    {"price": "470.0", "time": "1704067200000"},
                    {"price": "478.4", "time": "1704240000000"}
                ]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_successful_run_writes_payloads_and_index() {
    let server = MockServer::start().await;
    mount_upstream(&server).await;

    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    let client = GoldApiClient::new(server.uri(), 5);

    let changed = ingest::run(&client, &store, run_date()).await.unwrap();
    assert!(changed);

    assert!(store.daily_path(run_date()).exists());
    assert!(store.latest_path(run_date()).exists());
    assert!(store.yearly_path(2024).exists());
    assert_eq!(store.load_index().unwrap(), vec!["2024-01-03".to_string()]);

    // payloads are persisted verbatim
    let daily: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.daily_path(run_date())).unwrap())
            .unwrap();
    assert_eq!(
        daily.pointer("/resultData/datas/0/name").unwrap(),
        "2024-01-03 09:30:00"
    );
}

#[tokio::test]
async fn test_failed_fetch_leaves_store_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todayPrices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultData": {"datas": []}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/latestPrice"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    let client = GoldApiClient::new(server.uri(), 5);

    let result = ingest::run(&client, &store, run_date()).await;
    assert!(result.is_err());

    // all-or-nothing: nothing written, index not created
    assert!(!store.daily_path(run_date()).exists());
    assert!(!store.index_path().exists());
    assert!(store.load_index().unwrap().is_empty());
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    mount_upstream(&server).await;

    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    let client = GoldApiClient::new(server.uri(), 5);

    assert!(ingest::run(&client, &store, run_date()).await.unwrap());
    assert!(!ingest::run(&client, &store, run_date()).await.unwrap());

    assert_eq!(store.load_index().unwrap(), vec!["2024-01-03".to_string()]);
}

#[tokio::test]
async fn test_runs_for_new_dates_extend_index_in_order() {
    let server = MockServer::start().await;
    mount_upstream(&server).await;

    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    let client = GoldApiClient::new(server.uri(), 5);

    let later: NaiveDate = "2024-01-05".parse().unwrap();
    assert!(ingest::run(&client, &store, later).await.unwrap());
    assert!(ingest::run(&client, &store, run_date()).await.unwrap());

    assert_eq!(
        store.load_index().unwrap(),
        vec!["2024-01-03".to_string(), "2024-01-05".to_string()]
    );
}
