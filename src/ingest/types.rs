// src/ingest/types.rs
use anyhow::Result;

/// Provenance tag for a normalized point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// NASA EONET event catalog.
    Eonet,
    /// NASA FIRMS satellite detection feed.
    Firms,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Eonet => "eonet",
            Source::Firms => "firms",
        }
    }
}

/// Canonical normalized fire observation, as served by the API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FirePoint {
    pub id: String, // e.g., "EONET_1234_2024-01-02T00:00:00Z", "firms_17"
    pub source: Source,
    pub title: String,
    pub lat: f64, // WGS84 degrees
    pub lon: f64,
    pub datetime: String, // ISO-8601-like, "" when the source has none
    pub confidence: u32,  // normalized 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>, // set by the proximity filter only
}

#[async_trait::async_trait]
pub trait FirePointSource: Send + Sync {
    async fn fetch_points(&self) -> Result<Vec<FirePoint>>;
    fn name(&self) -> &'static str;
}
