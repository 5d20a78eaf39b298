//! Shared fixtures: a small but consistent artifact set on disk

#![allow(dead_code)]

use serde_json::json;
use std::path::Path;

/// Terms that push toward REAL
pub const FACTUAL_TERMS: [&str; 20] = [
    "nasa", "mars", "rover", "samples", "rock", "collects", "scientists", "announced",
    "evidence", "water", "mission", "researchers", "surface", "study", "data", "confirmed",
    "agency", "space", "planet", "analysis",
];

/// Terms that push toward FAKE
pub const SENSATIONAL_TERMS: [&str; 20] = [
    "shocking", "secret", "hoax", "exposed", "truth", "miracle", "they", "hide", "banned",
    "conspiracy", "illuminati", "cure", "doctors", "hate", "trick", "elites", "revealed",
    "viral", "breaking", "unbelievable",
];

pub const MARS_TITLE: &str = "NASA collects new rock samples from Mars";
pub const MARS_BODY: &str = "The Mars rover collected rock samples from the surface. \
Scientists at NASA announced the mission data today. \
Researchers confirmed evidence of ancient water in the analysis.";
/// Distinct vocabulary terms in `MARS_TITLE + MARS_BODY`
pub const MARS_NNZ: u64 = 16;

pub const SENSATIONAL_BODY: &str = "SHOCKING secret cure they hide! Doctors hate this trick.";

/// Write model.json, vectorizer.json and label_map.json into `dir`
pub fn write_artifacts(dir: &Path) {
    let terms: Vec<&str> = FACTUAL_TERMS
        .iter()
        .chain(SENSATIONAL_TERMS.iter())
        .copied()
        .collect();
    let vocabulary: serde_json::Map<String, serde_json::Value> = terms
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), json!(i)))
        .collect();
    let coef: Vec<f64> = terms
        .iter()
        .map(|t| if FACTUAL_TERMS.contains(t) { 1.0 } else { -1.5 })
        .collect();

    let vectorizer = json!({
        "vocabulary": vocabulary,
        "idf": vec![1.0; terms.len()],
        "stop_words": ["the", "a", "of", "in", "at", "from", "this"],
        "sublinear_tf": false,
        "norm": "l2",
    });
    let model = json!({
        "coef": coef,
        "intercept": 0.0,
        "classes": [0, 1],
    });
    let labels = json!({ "FAKE": 0, "REAL": 1 });

    std::fs::create_dir_all(dir).unwrap();
    for (name, value) in [
        ("vectorizer.json", vectorizer),
        ("model.json", model),
        ("label_map.json", labels),
    ] {
        std::fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }
}
