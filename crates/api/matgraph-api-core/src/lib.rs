//! matgraph-api-core: the engine-agnostic boundary between a node graph and its host.
//!
//! A graph never touches engine objects directly. It reads time from a [`Clock`], asks a
//! [`ResourceCatalog`] which numeric properties a bound resource exposes, and describes the
//! property assignments it wants as a [`WriteBatch`] that the host applies through a
//! [`PropertySink`].

pub mod clock;
pub mod material;
pub mod resource;
pub mod write_ops;

pub use clock::{Clock, ManualClock};
pub use material::{Material, MaterialTable};
pub use resource::{PropertySink, ResourceCatalog, ResourceRef};
pub use write_ops::{PropertyWrite, WriteBatch};
