//! Shared graph documents and material catalogs for tests and benches.
//!
//! Fixture files live in the repository-level `fixtures/` directory and are indexed by
//! `fixtures/manifest.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "node-graphs")]
    node_graphs: BTreeMap<String, NodeGraphEntry>,
    materials: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NodeGraphEntry {
    graph: String,
    /// Catalog the graph expects to be loaded against.
    #[serde(default)]
    materials: Option<String>,
}

impl Manifest {
    fn graph(&self, name: &str) -> Result<&NodeGraphEntry> {
        self.node_graphs
            .get(name)
            .with_context(|| format!("no node graph named '{name}' in fixtures/manifest.json"))
    }

    fn catalog<'a>(&'a self, name: &'a str) -> Result<Fixture<'a>> {
        self.materials
            .get(name)
            .map(|file| Fixture { name, file })
            .with_context(|| format!("no material catalog named '{name}' in fixtures/manifest.json"))
    }
}

/// One manifest entry resolved to its file under `fixtures/`.
struct Fixture<'a> {
    name: &'a str,
    file: &'a str,
}

impl Fixture<'_> {
    fn text(&self) -> Result<String> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(self.file);
        fs::read_to_string(&path)
            .with_context(|| format!("fixture '{}': cannot read {}", self.name, path.display()))
    }

    fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.text()?)
            .with_context(|| format!("fixture '{}': {} is not valid", self.name, self.file))
    }
}

pub mod node_graphs {
    use super::*;

    fn fixture(name: &str) -> Result<Fixture<'_>> {
        let entry = MANIFEST.graph(name)?;
        Ok(Fixture {
            name,
            file: &entry.graph,
        })
    }

    /// Fixture names, sorted.
    pub fn keys() -> Vec<String> {
        MANIFEST.node_graphs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        fixture(name)?.text()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        fixture(name)?.parse()
    }

    /// Name of the material catalog this graph is meant to load against, if any.
    pub fn materials_key(name: &str) -> Result<Option<String>> {
        Ok(MANIFEST.graph(name)?.materials.clone())
    }
}

pub mod materials {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.materials.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        MANIFEST.catalog(name)?.text()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        MANIFEST.catalog(name)?.parse()
    }
}
