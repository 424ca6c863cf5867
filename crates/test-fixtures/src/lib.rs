//! Test fixture loader for skeleton datasets and seeded synthetic samples.
//!
//! Skeletons live as JSON under `data/`; samples are generated on the fly
//! from fixed seeds so every test sees the same numbers.

pub mod synthetic;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    paths.sort();
    paths
}

/// A skeleton as stored on disk: node list plus directed `[cause, effect]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct SkeletonFixture {
    pub name: String,
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
    /// Whether the stored orientation contains a directed cycle.
    #[serde(default)]
    pub cyclic: bool,
}

/// Load `data/skeletons/<name>.json`.
pub fn load_skeleton(name: &str) -> SkeletonFixture {
    load_fixture(&format!("skeletons/{name}.json"))
}
