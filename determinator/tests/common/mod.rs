#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;

use determinator::{Determination, Determinator, FileRetrieval};

/// Major and minor version of the standard tests this harness understands.
pub const STANDARD_TESTS_VERSION: (u64, u64) = (0, 1);

pub static STANDARD_TESTS_PATH: Lazy<PathBuf> =
    Lazy::new(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/standard-tests"));

#[derive(Debug, Deserialize)]
pub struct Section {
    pub section: String,
    pub examples: Vec<Example>,
}

#[derive(Debug, Deserialize)]
pub struct Example {
    pub why: String,
    pub feature: String,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub guid: Value,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
    /// Absent when the call is expected to fail.
    #[serde(default)]
    pub returns: Option<Determination>,
}

impl Example {
    // identifiers that aren't strings count as not given
    pub fn id(&self) -> Option<&str> {
        self.id.as_str()
    }

    pub fn guid(&self) -> Option<&str> {
        self.guid.as_str()
    }
}

pub fn check_version(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path.join("VERSION")).context("reading VERSION")?;
    let mut parts = raw.trim().split('.').map(str::parse::<u64>);
    let (major, minor) = match (parts.next(), parts.next()) {
        (Some(Ok(major)), Some(Ok(minor))) => (major, minor),
        _ => bail!("malformed standard tests version: {raw:?}"),
    };
    if (major, minor) != STANDARD_TESTS_VERSION {
        bail!(
            "standard tests are version {major}.{minor}, harness expects {}.{}",
            STANDARD_TESTS_VERSION.0,
            STANDARD_TESTS_VERSION.1
        );
    }
    Ok(())
}

pub fn load_examples(path: &Path) -> Result<Vec<Section>> {
    check_version(path)?;
    let raw = std::fs::read(path.join("examples.json")).context("reading examples.json")?;
    Ok(serde_json::from_slice(&raw)?)
}

pub fn standard_determinator() -> Determinator<FileRetrieval> {
    Determinator::new(FileRetrieval::new(STANDARD_TESTS_PATH.as_path()))
}

pub fn actor_keys(count: usize) -> impl Iterator<Item = String> {
    (0..count).map(|n| format!("actor-{n}"))
}
