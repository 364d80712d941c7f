//! Opaque resource handles and the capabilities a host exposes for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to an external resource (typically a material) as persisted in a
/// graph document. The graph never interprets the string; only the host resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(pub String);

impl ResourceRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Read side of the host boundary: which numeric properties does a resource expose?
pub trait ResourceCatalog {
    /// Names of the float properties exposed by `resource`, in the host's declaration order.
    /// `None` when the handle does not resolve to anything the host knows about.
    fn list_numeric_properties(&self, resource: &ResourceRef) -> Option<Vec<String>>;
}

/// Write side of the host boundary.
pub trait PropertySink {
    /// Assign `value` to the float property `name` on `resource`. Unknown resources or
    /// properties are the host's concern; implementations should ignore them quietly.
    fn set_numeric_property(&mut self, resource: &ResourceRef, name: &str, value: f32);
}

impl<T: ResourceCatalog + ?Sized> ResourceCatalog for &T {
    fn list_numeric_properties(&self, resource: &ResourceRef) -> Option<Vec<String>> {
        (**self).list_numeric_properties(resource)
    }
}

impl<T: PropertySink + ?Sized> PropertySink for &mut T {
    fn set_numeric_property(&mut self, resource: &ResourceRef, name: &str, value: f32) {
        (**self).set_numeric_property(resource, name, value)
    }
}
