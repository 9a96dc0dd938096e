use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::ingest::providers::{eonet::EonetProvider, firms::FirmsProvider};
use crate::ingest::types::{FirePoint, FirePointSource};
use crate::ingest::{collect_points, dedup_points};
use crate::proximity::nearby_points;

pub const DEFAULT_RADIUS_KM: f64 = 50.0;

#[derive(Clone)]
pub struct AppState {
    sources: Arc<Vec<Box<dyn FirePointSource>>>,
}

impl AppState {
    /// Wire the two live providers, event catalog first.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let timeout = config.request_timeout();
        let sources: Vec<Box<dyn FirePointSource>> = vec![
            Box::new(EonetProvider::new(
                config.eonet_events_url.clone(),
                timeout,
            )?),
            Box::new(FirmsProvider::new(config.firms_csv_url(), timeout)?),
        ];
        Ok(Self::with_sources(sources))
    }

    /// State over arbitrary sources; tests inject stubs here.
    pub fn with_sources(sources: Vec<Box<dyn FirePointSource>>) -> Self {
        Self {
            sources: Arc::new(sources),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/fires", get(api_fires))
        .route("/api/nearby", get(api_nearby))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Combined list of fire points from both sources, deduplicated by rounded
/// coordinates per source.
async fn api_fires(State(state): State<AppState>) -> Json<Vec<FirePoint>> {
    let points = collect_points(&state.sources).await;
    Json(dedup_points(points))
}

/// Fires within `radius_km` of `lat`,`lon`, sorted by distance. Both
/// sources are fetched fresh; the listing endpoint's dedup is not applied
/// here.
async fn api_nearby(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let Some((lat, lon, radius_km)) = parse_nearby_query(&q) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Provide lat, lon as query params" })),
        )
            .into_response();
    };

    let points = collect_points(&state.sources).await;
    Json(nearby_points(points, lat, lon, radius_km)).into_response()
}

fn parse_nearby_query(q: &HashMap<String, String>) -> Option<(f64, f64, f64)> {
    let lat = q.get("lat")?.parse::<f64>().ok()?;
    let lon = q.get("lon")?.parse::<f64>().ok()?;
    let radius_km = match q.get("radius_km") {
        Some(r) => r.parse::<f64>().ok()?,
        None => DEFAULT_RADIUS_KM,
    };
    Some((lat, lon, radius_km))
}
