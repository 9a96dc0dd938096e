// src/confidence.rs
// Upstream confidence values come in three shapes: absent, a numeric string
// ("45"), or a categorical word ("low" / "nominal" / "high"). Everything is
// mapped onto one 0-100 integer scale.

/// Fallback used for absent or unrecognized confidence values.
pub const DEFAULT_CONFIDENCE: u32 = 60;

/// Map a raw confidence value to the normalized 0-100 scale. Never fails;
/// unmapped input falls back to [`DEFAULT_CONFIDENCE`].
pub fn normalize_confidence(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_CONFIDENCE;
    };
    let s = raw.trim();
    if s.is_empty() {
        return DEFAULT_CONFIDENCE;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().unwrap_or(DEFAULT_CONFIDENCE);
    }
    match s.to_ascii_lowercase().as_str() {
        "low" => 30,
        "nominal" | "normal" => 60,
        "high" => 90,
        _ => DEFAULT_CONFIDENCE,
    }
}
