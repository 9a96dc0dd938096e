// src/ingest/providers/firms.rs
// NASA FIRMS area CSV: satellite thermal-anomaly detections, one row per
// hotspot. Column names vary across products, so each field is resolved
// through an ordered alias list against the header row.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use csv::StringRecord;
use metrics::{counter, histogram};

use crate::confidence::normalize_confidence;
use crate::ingest::types::{FirePoint, FirePointSource, Source};

const LAT_ALIASES: &[&str] = &["latitude", "lat", "Latitude"];
const LON_ALIASES: &[&str] = &["longitude", "lon", "Longitude"];
const CONFIDENCE_ALIASES: &[&str] = &["confidence", "confidence_level", "CONFIDENCE"];
const DATE_ALIASES: &[&str] = &["acq_date"];
const TIME_ALIASES: &[&str] = &["acq_time"];

const DETECTION_TITLE: &str = "FIRMS fire";

/// Resolved header positions for the columns we read.
struct Columns {
    lat: Option<usize>,
    lon: Option<usize>,
    confidence: Option<usize>,
    date: Option<usize>,
    time: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Self {
        Self {
            lat: find_column(headers, LAT_ALIASES),
            lon: find_column(headers, LON_ALIASES),
            confidence: find_column(headers, CONFIDENCE_ALIASES),
            date: find_column(headers, DATE_ALIASES),
            time: find_column(headers, TIME_ALIASES),
        }
    }
}

/// Try aliases in order, case-sensitively; first one present in the header
/// wins.
fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|a| headers.iter().position(|h| h == *a))
}

fn field<'r>(rec: &'r StringRecord, col: Option<usize>) -> Option<&'r str> {
    col.and_then(|i| rec.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Rebuild the acquisition timestamp from the date field plus the 4-digit
/// HHMM time field. A time that is not exactly 4 characters (or does not
/// name a valid hour/minute) degrades to midnight; an unparseable date
/// yields None and the row is skipped.
fn acquisition_datetime(date: &str, time: Option<&str>) -> Option<String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = time
        .filter(|t| t.len() == 4)
        .and_then(|t| t.parse::<u32>().ok())
        .and_then(|hhmm| NaiveTime::from_hms_opt(hhmm / 100, hhmm % 100, 0))
        .unwrap_or(NaiveTime::MIN);
    Some(
        date.and_time(time)
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

fn point_from_record(index: usize, rec: &StringRecord, cols: &Columns) -> Option<FirePoint> {
    let lat: f64 = field(rec, cols.lat)?.parse().ok()?;
    let lon: f64 = field(rec, cols.lon)?.parse().ok()?;
    let confidence = normalize_confidence(field(rec, cols.confidence));
    let datetime = match field(rec, cols.date) {
        Some(d) => acquisition_datetime(d, field(rec, cols.time))?,
        None => String::new(),
    };

    Some(FirePoint {
        id: format!("firms_{index}"),
        source: Source::Firms,
        title: DETECTION_TITLE.to_string(),
        lat,
        lon,
        datetime,
        confidence,
        distance_km: None,
    })
}

/// Normalize a FIRMS CSV payload into fire points. Rows that fail to parse
/// are skipped and counted; the row index keeps counting across skips so
/// ids stay aligned with feed positions.
pub fn points_from_csv(text: &str) -> Result<Vec<FirePoint>> {
    let t0 = std::time::Instant::now();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = rdr
        .headers()
        .context("reading detection feed header")?
        .clone();
    let cols = Columns::resolve(&headers);

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (i, rec) in rdr.records().enumerate() {
        let Ok(rec) = rec else {
            skipped += 1;
            continue;
        };
        match point_from_record(i, &rec, &cols) {
            Some(p) => out.push(p),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "detection feed rows skipped");
        counter!("ingest_rows_skipped_total").increment(skipped as u64);
    }
    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_points_total").increment(out.len() as u64);
    Ok(out)
}

/// FIRMS area-CSV provider. Without a configured feed URL (no map key) it
/// is a no-op that contributes nothing.
pub struct FirmsProvider {
    url: Option<String>,
    client: reqwest::Client,
}

impl FirmsProvider {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building firms http client")?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl FirePointSource for FirmsProvider {
    async fn fetch_points(&self) -> Result<Vec<FirePoint>> {
        let Some(url) = &self.url else {
            return Ok(Vec::new());
        };
        let body = self
            .client
            .get(url)
            .send()
            .await
            .context("firms http get()")?
            .error_for_status()
            .context("firms http status")?
            .text()
            .await
            .context("firms http .text()")?;
        points_from_csv(&body)
    }

    fn name(&self) -> &'static str {
        "firms"
    }
}
