use std::fs;
use std::time::Duration;

use firewatch::ingest::providers::firms::{points_from_csv, FirmsProvider};
use firewatch::ingest::types::FirePointSource;
use firewatch::Source;

#[test]
fn firms_fixture_parses_rows_and_skips_bad_ones() {
    let body = fs::read_to_string("tests/fixtures/firms_sample.csv")
        .expect("missing tests/fixtures/firms_sample.csv");

    let points = points_from_csv(&body).expect("firms parse ok");

    // rows 2 (bad latitude) and 3 (malformed date) are skipped, but their
    // indices still count
    let ids: Vec<&str> = points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["firms_0", "firms_1", "firms_4", "firms_5"]);

    let p = &points[0];
    assert_eq!(p.source, Source::Firms);
    assert_eq!(p.title, "FIRMS fire");
    assert_eq!(p.lat, 38.2);
    assert_eq!(p.lon, -120.5);
    assert_eq!(p.datetime, "2024-01-05T13:45:00Z");
    assert_eq!(p.confidence, 60); // "nominal"

    // 2-char time degrades to midnight
    assert_eq!(points[1].datetime, "2024-01-05T00:00:00Z");
    assert_eq!(points[1].confidence, 90); // "high"

    // empty date keeps the row with an empty timestamp
    assert_eq!(points[2].datetime, "");

    // numeric confidence passes through
    assert_eq!(points[3].confidence, 85);
}

#[test]
fn alias_column_names_resolve() {
    let csv = "\
lat,lon,confidence_level,acq_date,acq_time
-12.3400,45.6700,high,2024-02-10,0930
";
    let points = points_from_csv(csv).expect("alias parse ok");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].lat, -12.34);
    assert_eq!(points[0].lon, 45.67);
    assert_eq!(points[0].confidence, 90);
    assert_eq!(points[0].datetime, "2024-02-10T09:30:00Z");
}

#[test]
fn missing_coordinate_columns_skip_every_row() {
    let csv = "\
brightness,acq_date,acq_time
330.5,2024-02-10,0930
";
    let points = points_from_csv(csv).expect("parse ok");
    assert!(points.is_empty());
}

#[tokio::test]
async fn unconfigured_provider_is_a_noop() {
    let provider = FirmsProvider::new(None, Duration::from_secs(10)).expect("build provider");
    let points = provider.fetch_points().await.expect("noop fetch ok");
    assert!(points.is_empty());
}
