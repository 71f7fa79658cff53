//! BVH fixtures listed in `fixtures/manifest.json`.
//!
//! Entries are either a bare relative path or `{ "path": ..., "frames": N }`
//! when a test wants to check the parsed frame count.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static BVH_FIXTURES: Lazy<BTreeMap<String, BvhFixture>> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    let manifest: Manifest = serde_json::from_str(raw).expect("fixtures manifest should parse");
    manifest
        .bvh
        .into_iter()
        .map(|(key, entry)| (key, entry.into()))
        .collect()
});

#[derive(Deserialize)]
struct Manifest {
    bvh: BTreeMap<String, ManifestEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        frames: Option<usize>,
    },
}

/// One BVH file and what the manifest says about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BvhFixture {
    /// Relative to the `fixtures/` directory.
    pub rel_path: String,
    pub frames: Option<usize>,
}

impl From<ManifestEntry> for BvhFixture {
    fn from(entry: ManifestEntry) -> Self {
        match entry {
            ManifestEntry::Path(rel_path) => Self {
                rel_path,
                frames: None,
            },
            ManifestEntry::Detailed { path, frames } => Self {
                rel_path: path,
                frames,
            },
        }
    }
}

impl BvhFixture {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(&self.rel_path)
    }

    pub fn read(&self) -> Result<String> {
        let path = self.path();
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read BVH fixture at {}", path.display()))
    }
}

pub mod bvh {
    use super::*;

    /// Fixture keys in sorted order.
    pub fn keys() -> Vec<String> {
        BVH_FIXTURES.keys().cloned().collect()
    }

    pub fn fixture(name: &str) -> Result<&'static BvhFixture> {
        BVH_FIXTURES
            .get(name)
            .with_context(|| format!("unknown bvh fixture '{name}'"))
    }

    pub fn text(name: &str) -> Result<String> {
        fixture(name)?.read()
    }

    /// Frame count recorded in the manifest, when the entry declares one.
    pub fn expected_frames(name: &str) -> Result<Option<usize>> {
        Ok(fixture(name)?.frames)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(fixture(name)?.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_is_readable() {
        for key in bvh::keys() {
            let text = bvh::text(&key).unwrap();
            assert!(text.trim_start().starts_with("HIERARCHY"), "{key}");
        }
    }

    #[test]
    fn bare_and_detailed_entries() {
        assert_eq!(bvh::expected_frames("mixamo-wave").unwrap(), Some(4));
        assert_eq!(bvh::expected_frames("unmapped-tail").unwrap(), None);
        assert!(bvh::path("plain-step").unwrap().ends_with("bvh/plain_step.bvh"));
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = bvh::text("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("unknown bvh fixture"));
    }
}
