//! Cian and Yandex status passes against a mock API.

use std::sync::Arc;

use feedwatch_core::{CianAccount, FailureKind, StatusCollector, YandexFeed};
use feedwatch_fetch::{FileDiagnostics, HttpClient, NoopDiagnostics};
use feedwatch_providers::{CianApiClient, CianStatusFetcher, YandexApiClient, YandexFeedFetcher};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> Arc<HttpClient> {
    Arc::new(HttpClient::new().unwrap())
}

// ============================================================================
// Cian
// ============================================================================

fn cian_fetcher(server: &MockServer, accounts: Vec<CianAccount>) -> CianStatusFetcher {
    CianStatusFetcher::new(
        accounts,
        CianApiClient::new(http(), format!("{}/v1/get-last-order-info", server.uri())),
        Arc::new(NoopDiagnostics),
    )
}

#[tokio::test]
async fn cian_counts_errors_and_warnings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/get-last-order-info"))
        .and(header("authorization", "Bearer north-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "offers": [
                { "id": 1, "errors": ["no photo"], "warnings": [] },
                { "id": 2, "errors": [], "warnings": ["short"] },
                { "id": 3, "errors": ["bad price"], "warnings": ["old"] },
                { "id": 4, "errors": [], "warnings": [] }
            ] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = cian_fetcher(&server, vec![CianAccount::new("North", "north-token")]);
    let lines = fetcher.collect().await;

    assert_eq!(
        lines[0].to_string(),
        "🚫 *Cian North*: 🚫 2 errors, ⚠️ 2 warnings"
    );
}

#[tokio::test]
async fn cian_clean_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"offers": []}})),
        )
        .mount(&server)
        .await;

    let fetcher = cian_fetcher(&server, vec![CianAccount::new("North", "t")]);
    let lines = fetcher.collect().await;

    assert_eq!(
        lines[0].to_string(),
        "✅ *Cian North*: no errors or warnings found"
    );
}

#[tokio::test]
async fn cian_non_200_is_status_failure_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "denied"})))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = cian_fetcher(&server, vec![CianAccount::new("North", "t")]);
    let lines = fetcher.collect().await;

    assert_eq!(lines[0].failure(), Some(FailureKind::HttpStatus(403)));
    assert_eq!(
        lines[0].to_string(),
        "❌ *Cian North*: data fetch error (code 403)"
    );
}

#[tokio::test]
async fn cian_json_is_decoded_before_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let fetcher = cian_fetcher(&server, vec![CianAccount::new("North", "t")]);
    let lines = fetcher.collect().await;

    assert_eq!(lines[0].failure(), Some(FailureKind::ParseJson));
}

#[tokio::test]
async fn cian_problem_subsets_reach_diagnostics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "offers": [ { "id": 7, "errors": ["x"] } ] }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = CianStatusFetcher::new(
        vec![CianAccount::new("North Office", "t")],
        CianApiClient::new(http(), server.uri()),
        Arc::new(FileDiagnostics::new(dir.path(), true)),
    );
    fetcher.collect().await;

    let errors = std::fs::read_to_string(dir.path().join("north_office_cian_errors.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&errors).unwrap();
    assert_eq!(value, json!([{ "id": 7, "errors": ["x"] }]));
    assert!(dir.path().join("north_office_cian_response.json").exists());
    assert!(!dir.path().join("north_office_cian_warnings.json").exists());
}

// ============================================================================
// Yandex
// ============================================================================

fn yandex_fetcher(server: &MockServer, feeds: Vec<YandexFeed>) -> YandexFeedFetcher {
    YandexFeedFetcher::new(
        feeds,
        YandexApiClient::new(http(), format!("{}/2.0", server.uri()), "oauth-1", "Vertis crm-9"),
        Arc::new(NoopDiagnostics),
    )
}

#[tokio::test]
async fn yandex_counts_state_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2.0/crm/feed/42/state"))
        .and(header("authorization", "OAuth oauth-1"))
        .and(header("x-authorization", "Vertis crm-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": { "errors": [ { "code": "E1" }, { "code": "E2" } ] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = yandex_fetcher(&server, vec![YandexFeed::new("South", "42")]);
    let lines = fetcher.collect().await;

    assert_eq!(lines[0].to_string(), "🚫 *Yandex South*: found 2 errors");
}

#[tokio::test]
async fn yandex_failures_are_per_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2.0/crm/feed/1/state"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2.0/crm/feed/2/state"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no feed"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2.0/crm/feed/3/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": {"errors": []}})))
        .mount(&server)
        .await;

    let fetcher = yandex_fetcher(
        &server,
        vec![
            YandexFeed::new("One", "1"),
            YandexFeed::new("Two", "2"),
            YandexFeed::new("Three", "3"),
        ],
    );
    let lines = fetcher.collect().await;

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].failure(), Some(FailureKind::ParseJson));
    assert_eq!(lines[1].failure(), Some(FailureKind::HttpStatus(404)));
    assert_eq!(lines[2].to_string(), "✅ *Yandex Three*: no errors found");
}

#[tokio::test]
async fn yandex_unreachable_host_is_request_error() {
    let fetcher = YandexFeedFetcher::new(
        vec![YandexFeed::new("South", "42")],
        YandexApiClient::new(http(), "http://127.0.0.1:9/2.0", "t", ""),
        Arc::new(NoopDiagnostics),
    );

    let lines = fetcher.collect().await;
    assert_eq!(lines[0].failure(), Some(FailureKind::Request));
}
