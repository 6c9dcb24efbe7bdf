use httpmock::prelude::*;
use serde_json::json;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use traffic_lens::commands::{
    execute_fetch, execute_normalize, validate_normalize_args, validate_report_file, FetchArgs,
    NormalizeArgs,
};
use traffic_lens::output::{
    build_report, read_report, render_dashboard, validate_metrics, write_report, DashboardState,
};
use traffic_lens::parser::schema::ReferrerShare;

fn write_payloads(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let birdseye = dir.join("birdseye.json");
    let log = dir.join("log.json");

    fs::write(
        &birdseye,
        json!({ "pid": { "current": { "unique": 40, "all": 95, "sdur": 3661.2 } } }).to_string(),
    )
    .unwrap();
    fs::write(
        &log,
        json!({
            "chart": {
                "x": ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"],
                "visits": [10, 12, 9, 9]
            },
            "params": { "ref": [
                { "name": "https://google.com", "count": 10 },
                { "name": "Direct", "count": 20 }
            ] }
        })
        .to_string(),
    )
    .unwrap();

    (birdseye, log)
}

#[tokio::test]
async fn test_normalize_command_writes_report() {
    let dir = tempdir().unwrap();
    let (birdseye_path, log_path) = write_payloads(dir.path());
    let output = dir.path().join("out/report.json");

    let args = NormalizeArgs {
        project_id: "pid".to_string(),
        window_days: 7,
        birdseye_path,
        log_path,
        output_json: Some(output.clone()),
        print_summary: false,
    };
    validate_normalize_args(&args).unwrap();

    let metrics = execute_normalize(args).await.unwrap();
    assert_eq!(metrics.sessions, 40);
    assert_eq!(metrics.top_referrers[0].name, "Direct");
    assert_eq!(metrics.top_referrers[0].percentage, 50);
    assert_eq!(metrics.weekly_traffic.labels[2], "29 FEB 2024");

    let report = read_report(&output).unwrap();
    assert_eq!(report.project_id, "pid");
    assert_eq!(report.period, "7d");
    assert_eq!(report.metrics, metrics);
    assert!(validate_metrics(&report.metrics).is_ok());

    let text = render_dashboard(&DashboardState::Ready(report.metrics));
    assert!(text.contains("01:01:01"));
}

#[tokio::test]
async fn test_normalize_command_missing_file() {
    let dir = tempdir().unwrap();
    let args = NormalizeArgs {
        project_id: "pid".to_string(),
        window_days: 7,
        birdseye_path: dir.path().join("nope.json"),
        log_path: dir.path().join("nope-either.json"),
        output_json: None,
        print_summary: false,
    };

    assert!(execute_normalize(args).await.is_err());
}

#[tokio::test]
async fn test_normalize_command_wrong_project() {
    let dir = tempdir().unwrap();
    let (birdseye_path, log_path) = write_payloads(dir.path());

    let args = NormalizeArgs {
        project_id: "other".to_string(),
        window_days: 7,
        birdseye_path,
        log_path,
        output_json: None,
        print_summary: false,
    };

    let err = execute_normalize(args).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Missing required field: other"));
}

#[tokio::test]
async fn test_normalize_command_reports_cause_once() {
    let dir = tempdir().unwrap();
    let (birdseye_path, log_path) = write_payloads(dir.path());

    let args = NormalizeArgs {
        project_id: "other".to_string(),
        window_days: 7,
        birdseye_path,
        log_path,
        output_json: None,
        print_summary: false,
    };

    let err = execute_normalize(args).await.unwrap_err();
    let message = format!("{:#}", err);
    assert_eq!(message.matches("Missing required field").count(), 1);
}

async fn mock_api(server: &MockServer, birdseye_delay: Duration) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/log/birdseye").query_param("pid", "pid");
            then.status(200).delay(birdseye_delay).json_body(json!({
                "pid": { "current": { "unique": 40, "all": 95, "sdur": 12 } }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/log").header("x-api-key", "secret");
            then.status(200).json_body(json!({
                "chart": { "x": ["2024-03-01"], "visits": [40] },
                "params": { "ref": [{ "name": "Direct", "count": 40 }] }
            }));
        })
        .await;
}

fn fetch_args(server: &MockServer, timeout: Duration) -> FetchArgs {
    FetchArgs {
        base_url: server.base_url(),
        project_id: "pid".to_string(),
        api_key: "secret".to_string(),
        timeout,
        print_summary: false,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fetch_command_writes_report() {
    let server = MockServer::start_async().await;
    mock_api(&server, Duration::ZERO).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("report.json");
    let args = FetchArgs {
        output_json: Some(output.clone()),
        ..fetch_args(&server, Duration::from_secs(5))
    };

    let metrics = execute_fetch(args).await.unwrap();
    assert_eq!(metrics.sessions, 40);
    assert_eq!(metrics.top_referrers[0].percentage, 100);
    assert_eq!(metrics.weekly_traffic.labels, vec!["1 MAR 2024"]);

    assert_eq!(read_report(&output).unwrap().metrics, metrics);
    validate_report_file(output).unwrap();
}

// The HTTP client's own default timeout is 20s; a longer cycle timeout
// must let a slower read finish.
#[tokio::test]
async fn test_fetch_command_request_timeout_follows_cycle_timeout() {
    let server = MockServer::start_async().await;
    mock_api(&server, Duration::from_secs(21)).await;

    let metrics = execute_fetch(fetch_args(&server, Duration::from_secs(40)))
        .await
        .unwrap();

    assert_eq!(metrics.sessions, 40);
}

#[tokio::test]
async fn test_fetch_command_short_timeout_fails() {
    let server = MockServer::start_async().await;
    mock_api(&server, Duration::from_secs(3)).await;

    let err = execute_fetch(fetch_args(&server, Duration::from_millis(200)))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to aggregate metrics for project pid"));
}

#[tokio::test]
async fn test_fetch_command_bad_status_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(401).body("Unauthorized");
        })
        .await;

    let err = execute_fetch(fetch_args(&server, Duration::from_secs(5)))
        .await
        .unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.contains("Transport failure: HTTP 401 from"));
    assert_eq!(message.matches("Unauthorized").count(), 1);
}

#[tokio::test]
async fn test_validate_report_file() {
    let dir = tempdir().unwrap();
    let (birdseye_path, log_path) = write_payloads(dir.path());
    let valid = dir.path().join("valid.json");

    let args = NormalizeArgs {
        project_id: "pid".to_string(),
        window_days: 7,
        birdseye_path,
        log_path,
        output_json: Some(valid.clone()),
        print_summary: false,
    };
    let mut metrics = execute_normalize(args).await.unwrap();
    assert!(validate_report_file(valid).is_ok());

    metrics.top_referrers.push(ReferrerShare {
        name: "late".to_string(),
        percentage: 90,
    });
    let unsorted = dir.path().join("unsorted.json");
    write_report(&build_report("pid", 7, metrics), &unsorted).unwrap();
    assert!(validate_report_file(unsorted).is_err());

    assert!(validate_report_file(dir.path().join("missing.json")).is_err());
}
