//! Integration tests for the batch enricher
//!
//! These tests use wiremock to create mock HTTP servers and run whole
//! batches end-to-end through the coordinator.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use sumi_glean::config::{parse_config, Config, HeaderConfig};
use sumi_glean::fetch::{Fetcher, RandomHeaders, RetryPolicy};
use sumi_glean::output::JsonLinesSink;
use sumi_glean::{Coordinator, EnrichedRecord};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a fetcher with short timeouts and retry delays for testing
fn test_fetcher(max_retries: u32) -> Fetcher {
    let headers = Arc::new(RandomHeaders::from_config(&HeaderConfig::default()).unwrap());
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .expect("Failed to build client");
    let retry = RetryPolicy {
        max_retries,
        delay: Duration::from_millis(10),
    };
    Fetcher::new(client, headers, retry)
}

fn parse_records(lines: &[String]) -> Vec<EnrichedRecord> {
    lines
        .iter()
        .map(|line| serde_json::from_str(line).expect("Malformed output line"))
        .collect()
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_single_page() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Site</title></head><body>
            <p>reach us at 202.555.0199 today</p>
            <a href="tel:+1-202-555-0170">Call us</a>
        </body></html>"#,
    )
    .await;

    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let coordinator = Coordinator::with_fetcher(test_fetcher(3), sink.clone(), 10, false);

    let website = format!("{}/", mock_server.uri());
    let summary = coordinator.run(vec![website.clone()]).await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "website": website,
            "phones": ["202 555 0199", "+1 202 555 0170"],
            "logo": ""
        })
    );
}

#[tokio::test]
async fn test_unreachable_url_does_not_stop_batch() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/a", "<p>Call 020 7946 0958 now</p>").await;
    mount_page(
        &mock_server,
        "/b",
        r#"<img class="logo" src="/static/logo.png"><a href="tel:0800123456">Free</a>"#,
    )
    .await;

    // Every attempt at /slow times out
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .expect(4)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let coordinator = Coordinator::with_fetcher(test_fetcher(3), sink.clone(), 10, false);

    let base = mock_server.uri();
    let urls = vec![
        format!("{}/a", base),
        format!("{}/slow", base),
        format!("{}/b", base),
        "http://127.0.0.1:1/".to_string(),
    ];
    let summary = coordinator.run(urls).await;

    assert_eq!(summary.submitted, 4);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 2);

    let records = parse_records(&sink.lines());
    let websites: HashSet<&str> = records.iter().map(|r| r.website.as_str()).collect();
    assert_eq!(records.len(), 2);
    assert!(websites.contains(format!("{}/a", base).as_str()));
    assert!(websites.contains(format!("{}/b", base).as_str()));

    let b = records
        .iter()
        .find(|r| r.website.ends_with("/b"))
        .unwrap();
    assert_eq!(b.phones, vec!["0800123456"]);
    assert_eq!(b.logo, format!("{}/static/logo.png", base));
}

#[tokio::test]
async fn test_error_status_page_is_processed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"<p>Page missing. Support: +49 30 1234 5678</p>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let coordinator = Coordinator::with_fetcher(test_fetcher(3), sink.clone(), 1, false);

    let summary = coordinator
        .run(vec![format!("{}/gone", mock_server.uri())])
        .await;

    assert_eq!(summary.succeeded, 1);
    let records = parse_records(&sink.lines());
    assert_eq!(records[0].phones, vec!["+49 30 1234 5678"]);
}

#[tokio::test]
async fn test_logo_resolved_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/en/home", base).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/en/home",
        r#"<img class="logo" src="img/logo.png"><img class="logo" src="img/logo-small.png">"#,
    )
    .await;

    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let coordinator = Coordinator::with_fetcher(test_fetcher(0), sink.clone(), 2, false);
    coordinator.run(vec![format!("{}/start", base)]).await;

    let records = parse_records(&sink.lines());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].website, format!("{}/start", base));
    assert_eq!(records[0].logo, format!("{}/en/img/logo-small.png", base));
}

#[tokio::test]
async fn test_many_urls_produce_well_formed_lines() {
    let mock_server = MockServer::start().await;
    for i in 0..25 {
        mount_page(
            &mock_server,
            &format!("/page{}", i),
            &format!(
                r#"<p>Line {} at 555 010 {:04}</p><img src="/brand/logo-{}.png">"#,
                i,
                1000 + i,
                i
            ),
        )
        .await;
    }

    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let coordinator = Coordinator::with_fetcher(test_fetcher(1), sink.clone(), 10, false);

    let urls: Vec<String> = (0..25)
        .map(|i| format!("{}/page{}", mock_server.uri(), i))
        .collect();
    let summary = coordinator.run(urls.clone()).await;

    assert_eq!(summary.succeeded, 25);

    // Completion order is not input order, so compare as sets
    let records = parse_records(&sink.lines());
    assert_eq!(records.len(), 25);
    let websites: HashSet<String> = records.iter().map(|r| r.website.clone()).collect();
    let expected: HashSet<String> = urls.into_iter().collect();
    assert_eq!(websites, expected);

    for record in &records {
        assert_eq!(record.phones.len(), 1);
        assert!(record.logo.starts_with(&mock_server.uri()));
    }
}

#[tokio::test]
async fn test_failure_records_from_config() {
    let config: Config = parse_config(
        r#"
[fetcher]
max-retries = 1
retry-delay-ms = 10
timeout-secs = 1
connect-timeout-secs = 1

[pool]
workers = 2

[output]
report-failures = true
"#,
    )
    .unwrap();

    let sink = Arc::new(JsonLinesSink::new(Vec::new()));
    let coordinator = Coordinator::new(&config, sink.clone()).unwrap();
    let summary = coordinator
        .run(vec!["http://127.0.0.1:1/".to_string()])
        .await;

    assert!(summary.has_failures());
    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["status"], "failed");
    assert_eq!(value["website"], "http://127.0.0.1:1/");
}
