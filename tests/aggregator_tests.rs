use pretty_assertions::assert_eq;
use serde_json::json;
use traffic_lens::aggregator::{
    extract_recent_week, format_duration, normalize, rank_referrers,
};
use traffic_lens::parser::{RawReferrer, ReferrerShare};
use traffic_lens::utils::error::{AggregateError, NormalizeError};

fn dates(n: usize) -> Vec<String> {
    (1..=n).map(|d| format!("2024-03-{:02}", d)).collect()
}

#[test]
fn test_format_duration_examples() {
    assert_eq!(format_duration(3661.0), "01:01:01");
    assert_eq!(format_duration(0.0), "00:00:00");
    assert_eq!(format_duration(86399.0), "23:59:59");
    assert_eq!(format_duration(90000.0), "25:00:00");
}

#[test]
fn test_rank_referrers_example() {
    let raw = vec![
        RawReferrer::new("a", 50),
        RawReferrer::new("b", 30),
        RawReferrer::new("c", 20),
    ];

    let ranked = rank_referrers(&raw, 100, 6);

    assert_eq!(
        ranked,
        vec![
            ReferrerShare { name: "a".to_string(), percentage: 50 },
            ReferrerShare { name: "b".to_string(), percentage: 30 },
            ReferrerShare { name: "c".to_string(), percentage: 20 },
        ]
    );
}

#[test]
fn test_rank_referrers_bounds_and_order() {
    let raw: Vec<RawReferrer> = [7u64, 93, 0, 41, 41, 12, 66, 3, 29]
        .iter()
        .enumerate()
        .map(|(i, c)| RawReferrer::new(format!("ref{}", i), *c))
        .collect();

    for total in [0u64, 1, 50, 100, 317] {
        for limit in [0usize, 1, 6, 20] {
            let ranked = rank_referrers(&raw, total, limit);
            assert!(ranked.len() <= limit);
            assert!(ranked.len() <= raw.len());
            assert!(ranked.windows(2).all(|w| w[0].percentage >= w[1].percentage));
            assert!(ranked.iter().all(|r| r.percentage <= 100));
        }
    }
}

#[test]
fn test_pure_functions_are_idempotent() {
    let raw = vec![RawReferrer::new("x", 3), RawReferrer::new("y", 9)];
    assert_eq!(rank_referrers(&raw, 17, 6), rank_referrers(&raw, 17, 6));

    let d = dates(9);
    let c: Vec<u64> = (0..9).collect();
    assert_eq!(
        extract_recent_week(&d, &c).unwrap(),
        extract_recent_week(&d, &c).unwrap()
    );

    assert_eq!(format_duration(1234.5), format_duration(1234.5));
}

#[test]
fn test_extract_recent_week_ten_buckets() {
    let d = dates(10);
    let c: Vec<u64> = (100..110).collect();

    let week = extract_recent_week(&d, &c).unwrap();

    assert_eq!(week.counts, vec![103, 104, 105, 106, 107, 108, 109]);
    assert_eq!(
        week.labels,
        vec![
            "4 MAR 2024",
            "5 MAR 2024",
            "6 MAR 2024",
            "7 MAR 2024",
            "8 MAR 2024",
            "9 MAR 2024",
            "10 MAR 2024"
        ]
    );
}

#[test]
fn test_extract_recent_week_mismatch() {
    let result = extract_recent_week(&dates(5), &[1, 2]);
    assert_eq!(result, Err(NormalizeError::ShapeMismatch { dates: 5, counts: 2 }));
}

#[test]
fn test_normalize_end_to_end() {
    let birdseye = json!({
        "STEzHcB1rALV": { "current": { "unique": 120, "all": 300, "sdur": 185 } }
    });
    let x = dates(10);
    let visits: Vec<u64> = (1..=10).collect();
    let log = json!({
        "chart": { "x": x, "visits": visits },
        "params": { "ref": [
            { "name": "https://github.com", "count": 18 },
            { "name": "https://google.com", "count": 60 },
            { "name": "https://news.ycombinator.com", "count": 30 }
        ] }
    });

    let metrics = normalize("STEzHcB1rALV", &birdseye, &log).unwrap();

    assert_eq!(metrics.sessions, 120);
    assert_eq!(metrics.pageviews, 300);
    assert_eq!(metrics.avg_session_duration_seconds, 185.0);
    assert_eq!(
        metrics.top_referrers,
        vec![
            ReferrerShare { name: "https://google.com".to_string(), percentage: 50 },
            ReferrerShare { name: "https://news.ycombinator.com".to_string(), percentage: 25 },
            ReferrerShare { name: "https://github.com".to_string(), percentage: 15 },
        ]
    );
    assert_eq!(metrics.weekly_traffic.len(), 7);
    assert_eq!(metrics.weekly_traffic.counts, vec![4, 5, 6, 7, 8, 9, 10]);
}

#[test]
fn test_normalize_missing_params_ref_is_shape_failure() {
    let birdseye = json!({ "pid": { "current": { "unique": 1, "all": 1, "sdur": 1 } } });
    let log = json!({ "chart": { "x": [], "visits": [] }, "params": {} });

    let err = normalize("pid", &birdseye, &log).unwrap_err();
    assert!(matches!(err, AggregateError::Shape(_)));
}
