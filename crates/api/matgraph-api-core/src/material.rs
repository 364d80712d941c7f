//! In-memory material host.
//!
//! [`MaterialTable`] is the reference implementation of both host capabilities. Embedders with
//! a real renderer implement [`ResourceCatalog`] and [`PropertySink`] themselves; tools and tests
//! use this table directly.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::resource::{PropertySink, ResourceCatalog, ResourceRef};
use crate::write_ops::PropertyWrite;

/// A bag of named float properties, kept in declaration order. Serializes as a plain
/// `{ "name": value }` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material {
    pub properties: IndexMap<String, f32>,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a numeric property with its initial value.
    pub fn with_property(mut self, name: impl Into<String>, value: f32) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.properties.get(name).copied()
    }
}

/// Materials keyed by resource. Deserializes from a `{ "resource": { "prop": value } }`
/// catalog object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "IndexMap<ResourceRef, Material>")]
pub struct MaterialTable {
    materials: IndexMap<ResourceRef, Material>,
    journal: Option<Vec<PropertyWrite>>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that additionally records every accepted assignment, in order.
    pub fn recording() -> Self {
        Self {
            materials: IndexMap::new(),
            journal: Some(Vec::new()),
        }
    }

    /// Start recording assignments on an existing table.
    pub fn record(mut self) -> Self {
        self.journal.get_or_insert_with(Vec::new);
        self
    }

    pub fn insert(&mut self, resource: impl Into<ResourceRef>, material: Material) -> Option<Material> {
        self.materials.insert(resource.into(), material)
    }

    pub fn with_material(mut self, resource: impl Into<ResourceRef>, material: Material) -> Self {
        self.insert(resource, material);
        self
    }

    pub fn remove(&mut self, resource: &ResourceRef) -> Option<Material> {
        self.materials.shift_remove(resource)
    }

    pub fn get(&self, resource: &ResourceRef) -> Option<&Material> {
        self.materials.get(resource)
    }

    /// Current value of `name` on `resource`, if both exist.
    pub fn value(&self, resource: &ResourceRef, name: &str) -> Option<f32> {
        self.materials.get(resource).and_then(|m| m.get(name))
    }

    /// Assignments recorded so far; empty unless the table was built with [`Self::recording`].
    pub fn journal(&self) -> &[PropertyWrite] {
        self.journal.as_deref().unwrap_or(&[])
    }

    pub fn clear_journal(&mut self) {
        if let Some(journal) = self.journal.as_mut() {
            journal.clear();
        }
    }
}

impl From<IndexMap<ResourceRef, Material>> for MaterialTable {
    fn from(materials: IndexMap<ResourceRef, Material>) -> Self {
        Self {
            materials,
            journal: None,
        }
    }
}

impl FromIterator<(ResourceRef, Material)> for MaterialTable {
    fn from_iter<I: IntoIterator<Item = (ResourceRef, Material)>>(iter: I) -> Self {
        Self {
            materials: iter.into_iter().collect(),
            journal: None,
        }
    }
}

impl ResourceCatalog for MaterialTable {
    fn list_numeric_properties(&self, resource: &ResourceRef) -> Option<Vec<String>> {
        self.materials
            .get(resource)
            .map(|m| m.properties.keys().cloned().collect())
    }
}

impl PropertySink for MaterialTable {
    fn set_numeric_property(&mut self, resource: &ResourceRef, name: &str, value: f32) {
        let Some(slot) = self
            .materials
            .get_mut(resource)
            .and_then(|m| m.properties.get_mut(name))
        else {
            debug!("ignoring write to unknown property {resource}.{name}");
            return;
        };
        *slot = value;
        if let Some(journal) = self.journal.as_mut() {
            journal.push(PropertyWrite::new(resource.clone(), name, value));
        }
    }
}
