// tests/ingest_dedup.rs
use firewatch::ingest::types::{FirePoint, FirePointSource};
use firewatch::ingest::{collect_points, dedup_points};
use firewatch::Source;

fn point(source: Source, lat: f64, lon: f64, id: &str) -> FirePoint {
    FirePoint {
        id: id.to_string(),
        source,
        title: "test".to_string(),
        lat,
        lon,
        datetime: String::new(),
        confidence: 60,
        distance_km: None,
    }
}

struct StaticSource {
    name: &'static str,
    points: Vec<FirePoint>,
}

#[async_trait::async_trait]
impl FirePointSource for StaticSource {
    async fn fetch_points(&self) -> anyhow::Result<Vec<FirePoint>> {
        Ok(self.points.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

struct FailingSource;

#[async_trait::async_trait]
impl FirePointSource for FailingSource {
    async fn fetch_points(&self) -> anyhow::Result<Vec<FirePoint>> {
        Err(anyhow::anyhow!("connection refused"))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

#[test]
fn near_identical_coords_collapse_within_a_source_only() {
    let raw = vec![
        point(Source::Eonet, 38.20001, -120.50002, "eonet-first"),
        point(Source::Eonet, 38.20003, -120.50004, "eonet-dup"),
        point(Source::Firms, 38.20002, -120.50001, "firms-kept"),
    ];
    let out = dedup_points(raw);
    let ids: Vec<String> = out.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["eonet-first", "firms-kept"]);
}

#[tokio::test]
async fn sources_concatenate_in_order() {
    let sources: Vec<Box<dyn FirePointSource>> = vec![
        Box::new(StaticSource {
            name: "eonet",
            points: vec![point(Source::Eonet, 1.0, 1.0, "a")],
        }),
        Box::new(StaticSource {
            name: "firms",
            points: vec![point(Source::Firms, 2.0, 2.0, "b")],
        }),
    ];
    let out = collect_points(&sources).await;
    let ids: Vec<String> = out.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn failing_source_contributes_nothing() {
    let sources: Vec<Box<dyn FirePointSource>> = vec![
        Box::new(FailingSource),
        Box::new(StaticSource {
            name: "firms",
            points: vec![point(Source::Firms, 2.0, 2.0, "kept")],
        }),
    ];
    let out = collect_points(&sources).await;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "kept");
}
