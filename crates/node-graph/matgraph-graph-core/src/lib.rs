//! Runtime half of the material node graph.
//!
//! A [`GraphDocument`] authored by the editor is rehydrated by [`load_graph`] into a live
//! [`Graph`] (node arena plus [`ConnectionTable`]). Each host frame calls [`tick`] (or drives a
//! [`GraphExecutor`]), which evaluates time sources first and then every other node, pushing
//! values along connections and collecting material writes into a
//! [`WriteBatch`](matgraph_api_core::WriteBatch).

pub mod config;
pub mod connections;
pub mod curve;
pub mod document;
pub mod error;
pub mod eval;
pub mod executor;
pub mod graph;
pub mod loader;
pub mod node;
pub mod schema;
pub mod topo;
pub mod types;

pub use config::{Config, Schedule};
pub use connections::{ConnectionTable, Edge, Route};
pub use curve::{AnimationCurve, Keyframe};
pub use document::{ConnectionData, GraphDocument, NodeData};
pub use error::{DocumentError, GraphError};
pub use eval::{eval_node, evaluate_all, execution_order, tick, Emission, GraphRuntime};
pub use executor::{GraphExecutor, GraphState};
pub use graph::Graph;
pub use loader::{build_node, load_graph, DropReason, DroppedConnection, LoadReport, SkippedNode};
pub use node::{Node, NodeParams, PortValues};
pub use schema::{registry, search_tree, NodeSignature, Registry};
pub use topo::topo_order;
pub use types::{NodeId, NodeIndex, NodeType, Position};
