//! Shared shot and config fixtures for the dolly-track crates.
//!
//! Everything is indexed by `fixtures/manifest.json` at the workspace root.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Workspace `fixtures/` directory, relative to this crate.
const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../fixtures");

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures/manifest.json should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    shots: HashMap<String, ShotEntry>,
    configs: HashMap<String, String>,
}

/// A persisted shot and, optionally, the samples it must produce.
#[derive(Debug, Deserialize)]
struct ShotEntry {
    path: String,
    #[serde(default)]
    samples: Option<String>,
}

impl Manifest {
    fn shot(&self, name: &str) -> Result<&ShotEntry> {
        self.shots
            .get(name)
            .ok_or_else(|| anyhow!("no shot fixture named '{name}' in the manifest"))
    }

    fn config(&self, name: &str) -> Result<&str> {
        self.configs
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("no config fixture named '{name}' in the manifest"))
    }
}

/// Expected camera channels at one frame. Channels left out are not checked.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedSample {
    pub frame: i32,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub look_at: Option<[f64; 3]>,
    #[serde(default)]
    pub up: Option<[f64; 3]>,
}

fn fixture_path(rel: &str) -> PathBuf {
    PathBuf::from(FIXTURES_DIR).join(rel)
}

fn read_fixture(rel: &str) -> Result<String> {
    let path = fixture_path(rel);
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

fn parse_fixture<T: DeserializeOwned>(rel: &str) -> Result<T> {
    serde_json::from_str(&read_fixture(rel)?).with_context(|| format!("decoding JSON in {rel}"))
}

/// Sorted so tests iterate in a stable order.
fn sorted_names<T>(map: &HashMap<String, T>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}

pub mod shots {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_names(&MANIFEST.shots)
    }

    /// Raw shot text as a host would have persisted it.
    pub fn text(name: &str) -> Result<String> {
        read_fixture(&MANIFEST.shot(name)?.path)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(fixture_path(&MANIFEST.shot(name)?.path))
    }

    /// Expected samples for the shot, if the manifest lists any.
    pub fn samples(name: &str) -> Result<Option<Vec<ExpectedSample>>> {
        MANIFEST
            .shot(name)?
            .samples
            .as_deref()
            .map(parse_fixture)
            .transpose()
    }
}

pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_names(&MANIFEST.configs)
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(MANIFEST.config(name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse_fixture(MANIFEST.config(name)?)
    }
}
