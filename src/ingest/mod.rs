// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::ingest::types::{FirePoint, FirePointSource, Source};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_points_total", "Points parsed from upstream sources.");
        describe_counter!(
            "ingest_rows_skipped_total",
            "Detection feed rows dropped due to parse failure."
        );
        describe_counter!("ingest_source_errors_total", "Source fetch/parse errors.");
        describe_histogram!("ingest_parse_ms", "Source payload parse time in milliseconds.");
    });
}

/// Dedup key: both coordinates rounded to 4 decimal places, plus provenance.
/// Two sources reporting the same location stay distinct; one source
/// reporting the same location twice collapses.
fn coordinate_key(p: &FirePoint) -> (i64, i64, Source) {
    (
        (p.lat * 1e4).round() as i64,
        (p.lon * 1e4).round() as i64,
        p.source,
    )
}

/// Remove coordinate duplicates per source. First occurrence wins and the
/// insertion order of first occurrences is preserved.
pub fn dedup_points(points: Vec<FirePoint>) -> Vec<FirePoint> {
    let mut seen: HashSet<(i64, i64, Source)> = HashSet::new();
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        if seen.insert(coordinate_key(&p)) {
            out.push(p);
        }
    }
    out
}

/// Fetch every source sequentially and concatenate the results in source
/// order. A failing source is logged and contributes nothing; the caller
/// cannot tell an empty source from a broken one.
pub async fn collect_points(sources: &[Box<dyn FirePointSource>]) -> Vec<FirePoint> {
    ensure_metrics_described();

    let mut raw = Vec::new();
    for s in sources {
        match s.fetch_points().await {
            Ok(mut v) => raw.append(&mut v),
            Err(e) => {
                tracing::warn!(error = ?e, source = s.name(), "source error");
                counter!("ingest_source_errors_total").increment(1);
            }
        }
    }
    raw
}
