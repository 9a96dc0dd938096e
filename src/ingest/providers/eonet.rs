// src/ingest/providers/eonet.rs
// NASA EONET event catalog: open wildfire events, each carrying a list of
// time-stamped geometries. The last geometry entry is treated as latest.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;
use serde_json::Value;

use crate::confidence::DEFAULT_CONFIDENCE;
use crate::ingest::types::{FirePoint, FirePointSource, Source};

pub const EONET_EVENTS_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3/events";

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    geometry: Vec<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    date: Option<String>,
    // Point geometries are [lon, lat]; polygons nest deeper and are skipped.
    #[serde(default)]
    coordinates: Value,
    confidence: Option<f64>,
}

/// Extract a flat [lon, lat] pair; anything else (missing, short, nested,
/// non-numeric) yields None and the event is skipped.
fn lon_lat(coordinates: &Value) -> Option<(f64, f64)> {
    let arr = coordinates.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    Some((arr[0].as_f64()?, arr[1].as_f64()?))
}

/// Normalize an EONET events payload into fire points.
pub fn points_from_json(body: &str) -> Result<Vec<FirePoint>> {
    let t0 = std::time::Instant::now();
    let data: EventsResponse = serde_json::from_str(body).context("parsing eonet events json")?;

    let mut out = Vec::with_capacity(data.events.len());
    for evt in &data.events {
        let Some(geom) = evt.geometry.last() else {
            continue;
        };
        let Some((lon, lat)) = lon_lat(&geom.coordinates) else {
            continue;
        };
        let datetime = geom.date.clone().unwrap_or_default();
        // EONET confidence, when present at all, is already numeric.
        let confidence = geom
            .confidence
            .map(|c| c.round() as u32)
            .unwrap_or(DEFAULT_CONFIDENCE);

        out.push(FirePoint {
            id: format!("{}_{}", evt.id.as_deref().unwrap_or_default(), datetime),
            source: Source::Eonet,
            title: evt.title.clone().unwrap_or_default(),
            lat,
            lon,
            datetime,
            confidence,
            distance_km: None,
        });
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_points_total").increment(out.len() as u64);
    Ok(out)
}

pub struct EonetProvider {
    url: String,
    client: reqwest::Client,
}

impl EonetProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building eonet http client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl FirePointSource for EonetProvider {
    async fn fetch_points(&self) -> Result<Vec<FirePoint>> {
        let body = self
            .client
            .get(&self.url)
            .query(&[
                ("status", "open"),
                ("category", "wildfires"),
                ("limit", "1000"),
            ])
            .send()
            .await
            .context("eonet http get()")?
            .error_for_status()
            .context("eonet http status")?
            .text()
            .await
            .context("eonet http .text()")?;
        points_from_json(&body)
    }

    fn name(&self) -> &'static str {
        "eonet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_polygon_coordinates_are_rejected() {
        let poly = json!([[[-120.0, 38.0], [-119.9, 38.0], [-119.9, 38.1]]]);
        assert!(lon_lat(&poly).is_none());
    }

    #[test]
    fn short_or_missing_coordinates_are_rejected() {
        assert!(lon_lat(&json!([-120.0])).is_none());
        assert!(lon_lat(&Value::Null).is_none());
    }

    #[test]
    fn flat_pair_is_accepted_in_lon_lat_order() {
        assert_eq!(lon_lat(&json!([-120.5, 38.2])), Some((-120.5, 38.2)));
    }
}
