//! Property writes produced by sink nodes during a tick.
//!
//! A [`PropertyWrite`] serializes to JSON as:
//!   { "resource": "materials/Water", "property": "_WaveHeight", "value": 0.5 }
//!
//! [`WriteBatch`] is a simple `Vec<PropertyWrite>` with helpers. The graph evaluator fills one
//! batch per tick and the host applies it through a [`PropertySink`].

use crate::resource::{PropertySink, ResourceRef};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyWrite {
    pub resource: ResourceRef,
    pub property: String,
    pub value: f32,
}

impl PropertyWrite {
    pub fn new(resource: ResourceRef, property: impl Into<String>, value: f32) -> Self {
        Self {
            resource,
            property: property.into(),
            value,
        }
    }
}

impl fmt::Display for PropertyWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ resource: {}, property: {}, value: {} }}",
            self.resource, self.property, self.value
        )
    }
}

/// A batch of property writes, kept in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch(pub Vec<PropertyWrite>);

impl WriteBatch {
    pub fn new() -> Self {
        WriteBatch(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        WriteBatch(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, op: PropertyWrite) {
        self.0.push(op);
    }

    pub fn extend(&mut self, other: impl IntoIterator<Item = PropertyWrite>) {
        self.0.extend(other);
    }

    pub fn into_vec(self) -> Vec<PropertyWrite> {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyWrite> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Merge another batch in-place (append).
    pub fn append(&mut self, mut other: WriteBatch) {
        self.0.append(&mut other.0)
    }

    /// Forward every write to `sink`, in emission order.
    pub fn apply(&self, sink: &mut dyn PropertySink) {
        for op in &self.0 {
            sink.set_numeric_property(&op.resource, &op.property, op.value);
        }
    }
}

impl IntoIterator for WriteBatch {
    type Item = PropertyWrite;
    type IntoIter = std::vec::IntoIter<PropertyWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
